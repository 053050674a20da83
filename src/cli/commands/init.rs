//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ouvidoria.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ouvidoria-sync configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - CLICKUP_KEY");
                println!("     - DB_DSN, DB_USER and DB_PASSWORD");
                println!("  3. Validate configuration: ouvidoria-sync validate-config --check-connection");
                println!("  4. Try a run without writing: ouvidoria-sync sync --dry-run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    pub fn generate_config() -> String {
        r#"# ouvidoria-sync configuration
# ClickUp view tasks -> DADOS_OUVIDORIA report table

[application]
log_level = "info"
dry_run = false

[source]
base_url = "https://api.clickup.com/api/v2/view/12zuj6-6773/task"
token = "${CLICKUP_KEY}"
# timeout_seconds = 60

[sink]
# Host, port and database; user and password are set below
dsn = "${DB_DSN}"
user = "${DB_USER}"
password = "${DB_PASSWORD}"
table = "DADOS_OUVIDORIA"
month_ref_column = "MES_REF"
# connection_timeout_seconds = 30

# First matching pattern decides how a column is loaded
[[sink.coercion]]
pattern = "DATA"
rule = "passthrough"

[[sink.coercion]]
pattern = "NUM"
rule = "numeric"

[transform]
date_columns = ["date_created", "date_closed"]
business_day_limit = 2
# State or municipal holidays on top of the national calendar
extra_holidays = []

[[transform.columns]]
source = "name"
target = "NOME_TAREFA"

[[transform.columns]]
source = "assignees_0_username"
target = "RESPONSAVEL"

[[transform.columns]]
source = "status_status"
target = "STATUS"

[[transform.columns]]
source = "date_created"
target = "DATA_CRIACAO"

[[transform.columns]]
source = "date_closed"
target = "DATA_FECHAMENTO"

[[transform.columns]]
source = "custom_fields_3_value"
target = "SLA"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
