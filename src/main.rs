use anyhow::Context;
use clap::Parser;
use repo_tools::config::{ConvertIconArgs, FindRouteArgs, OutputFormat};
use repo_tools::core::route_finder::render_json;
use repo_tools::utils::logger;
use repo_tools::utils::validation::{validate_path, Validate};
use repo_tools::{Cli, Commands, ToolRunner, ToolsConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI args: {:?}", cli);

    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::ConvertIcon(args) => convert_icon(args, config_path),
        Commands::FindRoute(args) => find_route(args, config_path)?,
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> repo_tools::Result<ToolsConfig> {
    let Some(path) = path else {
        return Ok(ToolsConfig::default());
    };

    tracing::info!("📁 Loading configuration from: {}", path);
    validate_path("--config", path)?;
    let config = ToolsConfig::from_file(path)?;
    config.validate()?;
    Ok(config)
}

/// 包含參數與設定檔錯誤在內，任何失敗都只印出訊息，程序仍以 0 結束
fn convert_icon(args: &ConvertIconArgs, config_path: Option<&str>) {
    let result = args
        .validate()
        .and_then(|_| load_config(config_path))
        .and_then(|config| ToolRunner::new(args.resolve(&config)).run());

    match result {
        Ok(report) => {
            tracing::info!("🖼️ {}x{} PNG written", report.width, report.height);
            println!("{}", report);
        }
        Err(e) => println!("Failed to convert: {}", e),
    }
}

/// 參數或設定錯誤以 1 結束；讀檔失敗不做處理，錯誤直接往上拋出終止程序
fn find_route(args: &FindRouteArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = match args.validate().and_then(|_| load_config(config_path)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let engine = ToolRunner::new(args.resolve(&config));
    let source = engine.tool().source().display().to_string();

    let matches = engine
        .run()
        .with_context(|| format!("cannot scan '{}'", source))?;

    match args.format {
        OutputFormat::Text => {
            for hit in &matches {
                println!("{}", hit);
            }
        }
        OutputFormat::Json => println!("{}", render_json(&matches)?),
    }

    Ok(())
}
