//! Data transformation logic
//!
//! Turns fetched task records into report rows:
//!
//! 1. **Flatten**: nested objects and arrays become `<parent>_<child>` columns
//! 2. **Select**: keep the configured source columns, synthesizing missing ones
//! 3. **Reformat dates**: timestamps become `DD/MM/YYYY`
//! 4. **Rename**: source names become report names
//! 5. **Derive**: `MES_REF`, `SLA_AJUSTADO`, `DIA_UTEIS` and `FILTRO`
//! 6. **Project**: one [`ReportRow`] per task

pub mod columns;
pub mod flatten;
pub mod frame;
pub mod report;

use crate::config::TransformConfig;
use crate::core::calendar::HolidayCalendar;
use crate::domain::{MonthReference, ReportRow, Result, TaskRecord};
use columns::FilterColumns;

pub use frame::Frame;

const BUSINESS_DAYS_COLUMN: &str = "DIA_UTEIS";

/// Columns the derivation steps read and write
const FILTER_COLUMNS: FilterColumns<'static> = FilterColumns {
    created: "DATA_CRIACAO",
    closed: "DATA_FECHAMENTO",
    business_days: BUSINESS_DAYS_COLUMN,
    filter: "FILTRO",
};

/// Record → report row pipeline
///
/// # Examples
///
/// ```
/// use ouvidoria_sync::config::TransformConfig;
/// use ouvidoria_sync::core::transform::TransformPipeline;
/// use ouvidoria_sync::domain::MonthReference;
/// use serde_json::json;
///
/// let pipeline = TransformPipeline::new(TransformConfig::default());
/// let record = json!({
///     "name": "Reclamação",
///     "status": {"status": "closed"},
///     "date_created": "1706540400000",
///     "date_closed": "1706626800000"
/// });
///
/// let month = MonthReference::new(2024, 2).unwrap();
/// let rows = pipeline
///     .run(vec![record.as_object().unwrap().clone()], &month)
///     .unwrap();
///
/// assert_eq!(rows[0].status.as_deref(), Some("closed"));
/// assert_eq!(rows[0].mes_ref, "01/02/2024");
/// ```
#[derive(Debug, Clone)]
pub struct TransformPipeline {
    config: TransformConfig,
    calendar: HolidayCalendar,
}

impl TransformPipeline {
    /// Creates a pipeline using the national calendar plus configured holidays
    pub fn new(config: TransformConfig) -> Self {
        let calendar = HolidayCalendar::with_extra_dates(config.extra_holidays.iter().copied());
        Self { config, calendar }
    }

    /// Transform fetched records into report rows tagged with `month_ref`
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SyncError::Transform`] if a row cannot be projected.
    pub fn run(&self, records: Vec<TaskRecord>, month_ref: &MonthReference) -> Result<Vec<ReportRow>> {
        let mut frame = flatten::flatten_records(records);
        tracing::debug!(
            rows = frame.len(),
            columns = frame.columns().len(),
            "Flattened task records"
        );

        let missing = frame.select(&self.config.source_columns());
        if !frame.is_empty() {
            for column in &missing {
                tracing::warn!(column = %column, "Source column absent from every task, filled with nulls");
            }
        }

        columns::reformat_dates(&mut frame, &self.config.date_columns);
        frame.rename_columns(&self.config.rename_pairs());

        columns::add_constant_column(&mut frame, "MES_REF", month_ref.as_str());
        columns::add_sla_digits_column(&mut frame, "SLA", "SLA_AJUSTADO");
        columns::add_filter_columns(
            &mut frame,
            FILTER_COLUMNS,
            &self.calendar,
            self.config.business_day_limit,
        );

        report::project_rows(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Filtro;
    use serde_json::{json, Value};

    fn records(values: Vec<Value>) -> Vec<TaskRecord> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn month() -> MonthReference {
        MonthReference::new(2024, 2).unwrap()
    }

    #[test]
    fn test_pipeline_full_task() {
        let pipeline = TransformPipeline::new(TransformConfig::default());
        let rows = pipeline
            .run(
                records(vec![json!({
                    "name": "Reclamação",
                    "assignees": [{"username": "ana"}],
                    "status": {"status": "closed"},
                    // 2024-01-29 and 2024-01-31, both at 15:00 UTC
                    "date_created": "1706540400000",
                    "date_closed": "1706713200000",
                    "custom_fields": [{}, {}, {}, {"value": "Prazo: 5 dias"}]
                })]),
                &month(),
            )
            .unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.nome_tarefa.as_deref(), Some("Reclamação"));
        assert_eq!(row.responsavel.as_deref(), Some("ana"));
        assert_eq!(row.status.as_deref(), Some("closed"));
        assert_eq!(row.data_criacao.as_deref(), Some("29/01/2024"));
        assert_eq!(row.data_fechamento.as_deref(), Some("31/01/2024"));
        assert_eq!(row.sla.as_deref(), Some("Prazo: 5 dias"));
        assert_eq!(row.mes_ref, "01/02/2024");
        assert_eq!(row.sla_ajustado, "5");
        assert_eq!(row.filtro, Filtro::Fora);
    }

    #[test]
    fn test_pipeline_synthesizes_missing_assignee() {
        let pipeline = TransformPipeline::new(TransformConfig::default());
        let rows = pipeline
            .run(
                records(vec![json!({"name": "a", "date_created": "1706540400000"})]),
                &month(),
            )
            .unwrap();

        assert_eq!(rows[0].responsavel, None);
        assert_eq!(rows[0].data_fechamento, None);
        assert_eq!(rows[0].sla_ajustado, "");
        assert_eq!(rows[0].filtro, Filtro::Ok);
    }

    #[test]
    fn test_pipeline_empty_input() {
        let pipeline = TransformPipeline::new(TransformConfig::default());
        assert!(pipeline.run(Vec::new(), &month()).unwrap().is_empty());
    }

    #[test]
    fn test_pipeline_uses_extra_holidays() {
        let mut config = TransformConfig::default();
        // Tuesday 2024-01-30 becomes a local holiday
        config
            .extra_holidays
            .push(chrono::NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
        let pipeline = TransformPipeline::new(config);
        let rows = pipeline
            .run(
                records(vec![json!({
                    "name": "a",
                    "date_created": "1706540400000",
                    "date_closed": "1706713200000"
                })]),
                &month(),
            )
            .unwrap();

        assert_eq!(rows[0].filtro, Filtro::Ok);
    }
}
