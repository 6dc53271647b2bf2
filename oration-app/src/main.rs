use anyhow::Result;
use clap::Parser;
use oration_common::observability::{LogConfig, LogFormat, init_logging};
use oration_config::{DEFAULT_CONFIG_FILE, LogEncoding, LoggingSettings, OrationConfigLoader};

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins); an explicit --config must exist
    let loader = match &cli.config {
        Some(path) => OrationConfigLoader::new().with_file(path),
        None => OrationConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let cfg = loader.load()?;

    let log_path = init_logging(log_config(&cfg.logging))?;
    tracing::debug!(path = %log_path.display(), "logging.ready");

    match cli.command {
        Command::Collect => {
            let report = commands::collect(&cfg.collector).await?;
            println!("{}", commands::collect_summary(&report));
        }
        Command::Sample(args) => {
            let report = commands::sample(&cfg.sampler, &args)?;
            println!("{}", commands::sample_summary(&report));
        }
    }

    Ok(())
}

fn log_config(settings: &LoggingSettings) -> LogConfig {
    LogConfig {
        app_name: "oration",
        log_dir: settings.dir.clone(),
        emit_stderr: settings.emit_stderr,
        format: match settings.format {
            LogEncoding::Text => LogFormat::Text,
            LogEncoding::Json => LogFormat::Json,
        },
        default_filter: settings.filter.clone(),
    }
}
