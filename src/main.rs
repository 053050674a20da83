use clap::Parser;
use ouvidoria_sync::cli::{Cli, Commands};
use ouvidoria_sync::config::{load_config, LoggingConfig};
use ouvidoria_sync::logging::{init_logging, LoggingGuard};
use std::process;

#[tokio::main]
async fn main() {
    // A missing .env is fine; variables may come from the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    process::exit(exit_code);
}

fn start_logging(level: &str, config: &LoggingConfig) -> Option<LoggingGuard> {
    match init_logging(level, config) {
        Ok(guard) => {
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                "ouvidoria-sync - ClickUp to report table"
            );
            Some(guard)
        }
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Sync(args) => {
            let config = match load_config(&cli.config) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to load configuration from {}: {e}", cli.config);
                    return Ok(e.exit_code());
                }
            };

            let level = cli
                .log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone());
            let Some(_guard) = start_logging(&level, &config.logging) else {
                return Ok(5);
            };

            args.execute(config).await
        }
        Commands::ValidateConfig(args) => {
            let level = cli.log_level.as_deref().unwrap_or("info");
            let Some(_guard) = start_logging(level, &LoggingConfig::default()) else {
                return Ok(5);
            };
            args.execute(&cli.config).await
        }
        Commands::Init(args) => {
            let level = cli.log_level.as_deref().unwrap_or("info");
            let Some(_guard) = start_logging(level, &LoggingConfig::default()) else {
                return Ok(5);
            };
            args.execute().await
        }
    }
}
