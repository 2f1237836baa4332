use crate::utils::error::Result;

/// 單次執行的工具，成功時回傳其產出
pub trait Tool {
    type Output;

    fn name(&self) -> &'static str;
    fn run(&self) -> Result<Self::Output>;
}
