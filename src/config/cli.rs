use crate::config::toml_config::ToolsConfig;
use crate::core::icon::{IconConverter, DEFAULT_ICON_INPUT, DEFAULT_ICON_OUTPUT};
use crate::core::route_finder::{RouteFinder, DEFAULT_ROUTE_SOURCE};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "repo-tools")]
#[command(about = "Small repository utilities: icon conversion and route lookup")]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert an icon file to PNG
    ConvertIcon(ConvertIconArgs),
    /// Print lines declaring a route and its handler function
    FindRoute(FindRouteArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConvertIconArgs {
    /// Icon to read [default: public/yeah.ico]
    #[arg(long)]
    pub input: Option<String>,

    /// PNG to write [default: assets/logo.png]
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FindRouteArgs {
    /// Source file to scan
    #[arg(long)]
    pub source: Option<String>,

    /// Route decorator marker [default: @app.route]
    #[arg(long)]
    pub route_marker: Option<String>,

    /// Path fragment that must appear on the route line [default: /songs]
    #[arg(long)]
    pub path_fragment: Option<String>,

    /// Function definition marker [default: def get_songs]
    #[arg(long)]
    pub function_marker: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ConvertIconArgs {
    /// 命令列 > 設定檔 > 預設值
    pub fn resolve(&self, config: &ToolsConfig) -> IconConverter {
        let input = self
            .input
            .as_deref()
            .or(config.icon_input())
            .unwrap_or(DEFAULT_ICON_INPUT);
        let output = self
            .output
            .as_deref()
            .or(config.icon_output())
            .unwrap_or(DEFAULT_ICON_OUTPUT);
        IconConverter::new(input, output)
    }
}

impl FindRouteArgs {
    /// 命令列 > 設定檔 > 預設值
    pub fn resolve(&self, config: &ToolsConfig) -> RouteFinder {
        let source = self
            .source
            .as_deref()
            .or(config.route_source())
            .unwrap_or(DEFAULT_ROUTE_SOURCE);

        let mut patterns = config.route_patterns();
        if let Some(marker) = &self.route_marker {
            patterns.route_marker = marker.clone();
        }
        if let Some(fragment) = &self.path_fragment {
            patterns.path_fragment = fragment.clone();
        }
        if let Some(marker) = &self.function_marker {
            patterns.function_marker = marker.clone();
        }

        RouteFinder::new(source, patterns)
    }
}

impl Validate for ConvertIconArgs {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            validate_path("--input", input)?;
        }
        if let Some(output) = &self.output {
            validate_path("--output", output)?;
        }
        Ok(())
    }
}

impl Validate for FindRouteArgs {
    fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            validate_path("--source", source)?;
        }
        if let Some(marker) = &self.route_marker {
            validate_non_empty_string("--route-marker", marker)?;
        }
        if let Some(fragment) = &self.path_fragment {
            validate_non_empty_string("--path-fragment", fragment)?;
        }
        if let Some(marker) = &self.function_marker {
            validate_non_empty_string("--function-marker", marker)?;
        }
        Ok(())
    }
}
