//! Projection of a transformed frame onto [`ReportRow`]s

use super::frame::Frame;
use crate::domain::{Filtro, ReportRow, Result, SyncError};
use serde_json::Value;
use std::str::FromStr;

/// Build one [`ReportRow`] per frame row
///
/// Mapped columns read as `None` when absent. The derived columns
/// (`MES_REF`, `SLA_AJUSTADO`, `FILTRO`) must be present on every row.
///
/// # Errors
///
/// Returns [`SyncError::Transform`] when a derived column is missing or
/// holds an invalid filter value.
pub fn project_rows(frame: &Frame) -> Result<Vec<ReportRow>> {
    (0..frame.len())
        .map(|row| project_row(frame, row))
        .collect()
}

fn project_row(frame: &Frame, row: usize) -> Result<ReportRow> {
    let text = |column: &str| cell_text(frame.value(row, column));
    let required = |column: &str| {
        text(column).ok_or_else(|| {
            SyncError::Transform(format!("Row {row} has no value for derived column {column}"))
        })
    };

    let filtro = Filtro::from_str(&required("FILTRO")?)
        .map_err(|e| SyncError::Transform(format!("Row {row}: {e}")))?;

    Ok(ReportRow {
        nome_tarefa: text("NOME_TAREFA"),
        responsavel: text("RESPONSAVEL"),
        status: text("STATUS"),
        data_criacao: text("DATA_CRIACAO"),
        data_fechamento: text("DATA_FECHAMENTO"),
        sla: text("SLA"),
        mes_ref: required("MES_REF")?,
        sla_ajustado: text("SLA_AJUSTADO").unwrap_or_default(),
        filtro,
    })
}

/// Text form of a scalar cell; null reads as `None`
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(values: Vec<Value>) -> Frame {
        Frame::from_records(
            values
                .into_iter()
                .map(|v| v.as_object().cloned().unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_project_rows() {
        let frame = frame(vec![json!({
            "NOME_TAREFA": "Reclamação",
            "STATUS": "closed",
            "DATA_CRIACAO": "29/01/2024",
            "DATA_FECHAMENTO": "30/01/2024",
            "SLA": 5,
            "MES_REF": "01/02/2024",
            "SLA_AJUSTADO": "5",
            "DIA_UTEIS": 2,
            "FILTRO": "OK"
        })]);

        let rows = project_rows(&frame).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.nome_tarefa.as_deref(), Some("Reclamação"));
        assert_eq!(row.responsavel, None);
        assert_eq!(row.sla.as_deref(), Some("5"));
        assert_eq!(row.mes_ref, "01/02/2024");
        assert_eq!(row.filtro, Filtro::Ok);
    }

    #[test]
    fn test_project_rows_requires_month_reference() {
        let frame = frame(vec![json!({"NOME_TAREFA": "a", "FILTRO": "OK"})]);
        let err = project_rows(&frame).unwrap_err();
        assert!(err.to_string().contains("MES_REF"));
    }

    #[test]
    fn test_project_rows_rejects_unknown_filter() {
        let frame = frame(vec![json!({"MES_REF": "01/02/2024", "FILTRO": "MAYBE"})]);
        assert!(matches!(
            project_rows(&frame),
            Err(SyncError::Transform(_))
        ));
    }

    #[test]
    fn test_project_empty_frame() {
        assert!(project_rows(&Frame::default()).unwrap().is_empty());
    }
}
