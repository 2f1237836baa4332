use crate::domain::ports::Tool;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ToolRunner<T: Tool> {
    tool: T,
}

impl<T: Tool> ToolRunner<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn run(&self) -> Result<T::Output> {
        let name = self.tool.name();
        let started = Instant::now();
        tracing::info!("🚀 Running {}", name);

        match self.tool.run() {
            Ok(output) => {
                tracing::info!("✅ {} finished in {:?}", name, started.elapsed());
                Ok(output)
            }
            Err(e) => {
                tracing::error!("❌ {} failed: {}", name, e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                Err(e)
            }
        }
    }
}
