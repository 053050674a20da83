//! Report row domain model
//!
//! The report row is the final shape loaded into the reporting table. Its
//! nine fields are fixed and ordered like the table's columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report column names, in load order
pub const REPORT_COLUMNS: [&str; 9] = [
    "NOME_TAREFA",
    "RESPONSAVEL",
    "STATUS",
    "DATA_CRIACAO",
    "DATA_FECHAMENTO",
    "SLA",
    "MES_REF",
    "SLA_AJUSTADO",
    "FILTRO",
];

/// Business-day filter outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filtro {
    /// Closed within the business-day limit
    #[serde(rename = "OK")]
    Ok,
    /// Closed after the business-day limit
    #[serde(rename = "FORA")]
    Fora,
}

impl Filtro {
    /// Classifies a business-day count against the inclusive limit
    pub fn from_business_days(days: u32, limit: u32) -> Self {
        if days <= limit {
            Filtro::Ok
        } else {
            Filtro::Fora
        }
    }

    /// Returns the value stored in the `FILTRO` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Filtro::Ok => "OK",
            Filtro::Fora => "FORA",
        }
    }
}

impl fmt::Display for Filtro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filtro {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OK" => Ok(Filtro::Ok),
            "FORA" => Ok(Filtro::Fora),
            other => Err(format!("Invalid filter value '{other}'. Must be OK or FORA")),
        }
    }
}

/// One row of the monthly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Task name (`NOME_TAREFA`)
    pub nome_tarefa: Option<String>,
    /// First assignee username (`RESPONSAVEL`)
    pub responsavel: Option<String>,
    /// Task status (`STATUS`)
    pub status: Option<String>,
    /// Creation date as `DD/MM/YYYY` (`DATA_CRIACAO`)
    pub data_criacao: Option<String>,
    /// Closing date as `DD/MM/YYYY` (`DATA_FECHAMENTO`)
    pub data_fechamento: Option<String>,
    /// Raw SLA custom field (`SLA`)
    pub sla: Option<String>,
    /// Month reference of the batch (`MES_REF`)
    pub mes_ref: String,
    /// Digits of the raw SLA, possibly empty (`SLA_AJUSTADO`)
    pub sla_ajustado: String,
    /// Business-day filter (`FILTRO`)
    pub filtro: Filtro,
}

impl ReportRow {
    /// Field values in [`REPORT_COLUMNS`] order
    pub fn values(&self) -> [Option<&str>; 9] {
        [
            self.nome_tarefa.as_deref(),
            self.responsavel.as_deref(),
            self.status.as_deref(),
            self.data_criacao.as_deref(),
            self.data_fechamento.as_deref(),
            self.sla.as_deref(),
            Some(self.mes_ref.as_str()),
            Some(self.sla_ajustado.as_str()),
            Some(self.filtro.as_str()),
        ]
    }
}

/// Position of a column in [`REPORT_COLUMNS`], matched case-insensitively
pub fn column_index(column: &str) -> Option<usize> {
    REPORT_COLUMNS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(column.trim()))
}
