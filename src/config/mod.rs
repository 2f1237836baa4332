#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{Cli, Commands, ConvertIconArgs, FindRouteArgs, OutputFormat};
pub use toml_config::ToolsConfig;
