//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// ouvidoria-sync - ClickUp to reporting table ETL job
#[derive(Parser, Debug)]
#[command(name = "ouvidoria-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ouvidoria.toml", env = "OUVIDORIA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "OUVIDORIA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch tasks and replace the current month in the report table
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
