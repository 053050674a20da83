//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types, so the
//! HTTP and SQL clients stay behind the adapters.

use thiserror::Error;

/// Main sync error type
///
/// Every fatal condition of a run ends up here and is reported once by the
/// CLI before the process exits.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Task source errors
    #[error("Task source error: {0}")]
    Fetch(#[from] FetchError),

    /// Report row shape does not match the sink table
    #[error("Schema mismatch on table {table}: report has {report_columns} columns, sink has {sink_columns}{detail}")]
    SchemaMismatch {
        table: String,
        report_columns: usize,
        sink_columns: usize,
        detail: String,
    },

    /// Deleting the month's existing rows failed
    #[error("Failed to delete rows for month reference {month_ref}: {message}")]
    Delete { month_ref: String, message: String },

    /// A single row insert failed; the whole load was rolled back
    #[error("Failed to insert row {row_index}: {message} (values: {values:?})")]
    Insert {
        row_index: usize,
        values: Vec<Option<String>>,
        message: String,
    },

    /// Database errors outside of the delete/insert steps
    #[error("Database error: {0}")]
    Database(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transformation errors
    #[error("Transform error: {0}")]
    Transform(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl SyncError {
    /// Process exit code reported by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::Configuration(_) | SyncError::Validation(_) => 2,
            SyncError::SchemaMismatch { .. }
            | SyncError::Delete { .. }
            | SyncError::Insert { .. } => 3,
            SyncError::Connection(_) | SyncError::Database(_) | SyncError::Fetch(_) => 4,
            _ => 5,
        }
    }
}

/// Task source errors
///
/// `UnexpectedStatus` only ends pagination; the other variants abort the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The request never produced a response
    #[error("Request could not be sent: {0}")]
    Transport(String),

    /// The response body was not the expected JSON document
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

impl FetchError {
    /// Status that ends pagination gracefully, if this error carries one
    ///
    /// `None` means the error is fatal for the run.
    pub fn pagination_status(&self) -> Option<u16> {
        match self {
            FetchError::UnexpectedStatus { status, .. } => Some(*status),
            FetchError::Transport(_) | FetchError::InvalidBody(_) => None,
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_display() {
        let err = SyncError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_fetch_error_conversion() {
        let fetch_err = FetchError::Transport("connection refused".to_string());
        let sync_err: SyncError = fetch_err.into();
        assert!(matches!(sync_err, SyncError::Fetch(_)));
    }

    #[test]
    fn test_only_status_errors_end_pagination() {
        let status = FetchError::UnexpectedStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(status.pagination_status(), Some(500));
        assert_eq!(FetchError::Transport("timeout".to_string()).pagination_status(), None);
        assert_eq!(FetchError::InvalidBody("not json".to_string()).pagination_status(), None);
    }

    #[test]
    fn test_schema_mismatch_display() {
        let err = SyncError::SchemaMismatch {
            table: "DADOS_OUVIDORIA".to_string(),
            report_columns: 9,
            sink_columns: 8,
            detail: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Schema mismatch on table DADOS_OUVIDORIA: report has 9 columns, sink has 8"
        );
    }

    #[test]
    fn test_insert_error_carries_values() {
        let err = SyncError::Insert {
            row_index: 2,
            values: vec![Some("Tarefa".to_string()), None],
            message: "value too long".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("row 2"));
        assert!(text.contains("Tarefa"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SyncError::Configuration("x".to_string()).exit_code(), 2);
        assert_eq!(
            SyncError::Delete {
                month_ref: "01/03/2025".to_string(),
                message: "x".to_string()
            }
            .exit_code(),
            3
        );
        assert_eq!(SyncError::Connection("x".to_string()).exit_code(), 4);
        assert_eq!(SyncError::Io("x".to_string()).exit_code(), 5);
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let sync_err: SyncError = toml_err.into();
        assert!(matches!(sync_err, SyncError::Configuration(_)));
        assert!(sync_err.to_string().contains("TOML parse error"));
    }
}
