//! Report sink factory
//!
//! This module builds the sink client from configuration.

use crate::adapters::database::traits::ReportSink;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::SinkConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the report sink described by `config`
///
/// No connection is opened here; the pool connects on first use.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the pool cannot
/// be built.
pub fn create_report_sink(config: &SinkConfig) -> Result<Arc<dyn ReportSink>> {
    tracing::info!(table = %config.table, "Creating PostgreSQL report sink");
    let client = PostgreSQLClient::new(config)?;
    let adapter = PostgreSQLAdapter::new(client);

    Ok(Arc::new(adapter) as Arc<dyn ReportSink>)
}
