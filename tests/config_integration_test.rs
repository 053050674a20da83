//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use ouvidoria_sync::config::{load_config, Coercion};
use ouvidoria_sync::domain::SyncError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("OUVIDORIA_APPLICATION_LOG_LEVEL");
    std::env::remove_var("OUVIDORIA_APPLICATION_DRY_RUN");
    std::env::remove_var("OUVIDORIA_SINK_TABLE");
    std::env::remove_var("OUVIDORIA_TRANSFORM_BUSINESS_DAY_LIMIT");
    std::env::remove_var("TEST_CLICKUP_KEY");
    std::env::remove_var("TEST_DB_PASSWORD");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const FULL_CONFIG: &str = r#"
[application]
log_level = "debug"
dry_run = true

[source]
base_url = "https://api.clickup.com/api/v2/view/abc/task"
token = "${TEST_CLICKUP_KEY}"
timeout_seconds = 30

[sink]
dsn = "host=db.internal port=5432 dbname=ouvidoria"
user = "loader"
password = "${TEST_DB_PASSWORD}"
table = "DADOS_OUVIDORIA"
month_ref_column = "MES_REF"

[[sink.coercion]]
pattern = "VALOR"
rule = "numeric"

[transform]
business_day_limit = 3
extra_holidays = ["2025-01-25"]

[logging]
local_enabled = true
local_path = "/var/log/ouvidoria"
local_rotation = "hourly"
"#;

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CLICKUP_KEY", "pk_secret");
    std::env::set_var("TEST_DB_PASSWORD", "db_secret");

    let file = write_config(FULL_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.source.token.expose_secret().as_str(), "pk_secret");
    assert_eq!(config.source.timeout_seconds, Some(30));
    assert_eq!(config.sink.password.expose_secret().as_str(), "db_secret");
    assert_eq!(config.sink.coercion.len(), 1);
    assert_eq!(config.sink.coercion[0].rule, Coercion::Numeric);
    assert_eq!(config.transform.business_day_limit, 3);
    assert_eq!(config.transform.extra_holidays.len(), 1);
    assert_eq!(config.transform.columns.len(), 6);
    assert_eq!(config.logging.local_rotation, "hourly");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_reported() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CLICKUP_KEY", "pk_secret");

    let file = write_config(FULL_CONFIG);
    let err = load_config(file.path()).unwrap_err();

    assert!(matches!(err, SyncError::Configuration(_)));
    assert!(err.to_string().contains("TEST_DB_PASSWORD"));
    assert_eq!(err.exit_code(), 2);

    cleanup_env_vars();
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CLICKUP_KEY", "pk_secret");
    std::env::set_var("TEST_DB_PASSWORD", "db_secret");
    std::env::set_var("OUVIDORIA_APPLICATION_DRY_RUN", "false");
    std::env::set_var("OUVIDORIA_SINK_TABLE", "DADOS_OUVIDORIA_HML");
    std::env::set_var("OUVIDORIA_TRANSFORM_BUSINESS_DAY_LIMIT", "5");

    let file = write_config(FULL_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert!(!config.application.dry_run);
    assert_eq!(config.sink.table, "DADOS_OUVIDORIA_HML");
    assert_eq!(config.transform.business_day_limit, 5);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_value() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CLICKUP_KEY", "pk_secret");
    std::env::set_var("TEST_DB_PASSWORD", "db_secret");
    std::env::set_var("OUVIDORIA_TRANSFORM_BUSINESS_DAY_LIMIT", "two");

    let file = write_config(FULL_CONFIG);
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("OUVIDORIA_TRANSFORM_BUSINESS_DAY_LIMIT"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_table_name_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[source]
token = "pk"

[sink]
dsn = "host=localhost"
user = "loader"
password = "pw"
table = "DADOS; DROP TABLE x"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("sink.table"));
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/ouvidoria.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
