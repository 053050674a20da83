//! PostgreSQL adapter implementing the report sink trait

use crate::adapters::database::traits::{LoadBatch, LoadColumn, LoadOutcome, ReportSink, SqlValue};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::statements::{
    delete_statement, insert_statement, ColumnTypes, COLUMNS_QUERY, COLUMN_TYPES_QUERY,
    TABLE_NAME_QUERY,
};
use crate::config::Coercion;
use crate::domain::{Result, SyncError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// PostgreSQL implementation of [`ReportSink`]
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Database message without the driver's generic prefix
fn pg_message(error: &tokio_postgres::Error) -> String {
    error
        .as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| error.to_string())
}

/// Parameters for one row, typed to match [`insert_statement`]
///
/// The boxes are held across awaits, so they must be `Send`.
fn bind_row(columns: &[LoadColumn], row: &[SqlValue]) -> Vec<Box<dyn ToSql + Sync + Send>> {
    columns
        .iter()
        .zip(row)
        .map(|(column, value)| -> Box<dyn ToSql + Sync + Send> {
            match column.coercion {
                Coercion::Numeric => Box::new(match value {
                    SqlValue::Number(number) => Some(*number),
                    SqlValue::Text(text) => text.trim().parse::<f64>().ok(),
                    SqlValue::Null => None,
                }),
                Coercion::Passthrough => Box::new(value.display_value()),
            }
        })
        .collect()
}

#[async_trait]
impl ReportSink for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let client = self.client.get_connection().await?;
        let rows = client
            .query(COLUMNS_QUERY, &[&table])
            .await
            .map_err(|e| {
                SyncError::Database(format!(
                    "Failed to read columns of table {table}: {}",
                    pg_message(&e)
                ))
            })?;

        Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
    }

    async fn replace_month(&self, batch: &LoadBatch) -> Result<LoadOutcome> {
        let mut connection = self.client.get_connection().await?;
        let pg_client: &mut tokio_postgres::Client = &mut connection;
        let tx = pg_client.transaction().await.map_err(|e| {
            SyncError::Database(format!("Failed to begin transaction: {}", pg_message(&e)))
        })?;

        let table: String = tx
            .query_opt(TABLE_NAME_QUERY, &[&batch.table])
            .await
            .map_err(|e| SyncError::Database(format!("Failed to resolve table: {}", pg_message(&e))))?
            .map(|row| row.get(0))
            .ok_or_else(|| SyncError::Database(format!("Table {} not found", batch.table)))?;

        let types = ColumnTypes::from_rows(
            tx.query(COLUMN_TYPES_QUERY, &[&table])
                .await
                .map_err(|e| {
                    SyncError::Database(format!(
                        "Failed to read column types of {table}: {}",
                        pg_message(&e)
                    ))
                })?
                .iter()
                .map(|row| (row.get::<_, String>(0), row.get::<_, String>(1))),
        );

        let month_ref = batch.month_ref.as_str();
        let deleted = tx
            .execute(
                delete_statement(&table, &batch.month_ref_column, &types).as_str(),
                &[&month_ref],
            )
            .await
            .map_err(|e| SyncError::Delete {
                month_ref: month_ref.to_string(),
                message: pg_message(&e),
            })?;

        tracing::info!(table = %table, month_ref = %month_ref, deleted, "Deleted existing rows");

        let insert = tx
            .prepare(&insert_statement(&table, &batch.columns, &types))
            .await
            .map_err(|e| {
                SyncError::Database(format!("Failed to prepare insert: {}", pg_message(&e)))
            })?;

        for (row_index, row) in batch.rows.iter().enumerate() {
            let params = bind_row(&batch.columns, row);
            let refs: Vec<&(dyn ToSql + Sync)> =
                params.iter().map(|p| &**p as &(dyn ToSql + Sync)).collect();

            if let Err(e) = tx.execute(&insert, &refs).await {
                let values: Vec<Option<String>> = row.iter().map(SqlValue::display_value).collect();
                let message = pg_message(&e);
                tracing::error!(
                    row_index,
                    values = ?values,
                    error = %message,
                    "Insert failed, rolling back"
                );
                // Dropping the transaction rolls it back
                return Err(SyncError::Insert {
                    row_index,
                    values,
                    message,
                });
            }
        }

        tx.commit().await.map_err(|e| {
            SyncError::Database(format!("Failed to commit transaction: {}", pg_message(&e)))
        })?;

        Ok(LoadOutcome {
            deleted,
            inserted: batch.rows.len(),
        })
    }

    fn describe(&self) -> String {
        self.client.description().to_string()
    }
}
