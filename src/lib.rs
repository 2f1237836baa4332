pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Cli, Commands};
pub use config::ToolsConfig;

pub use core::{icon::IconConverter, route_finder::RouteFinder, runner::ToolRunner};
pub use utils::error::{Result, ToolError};
