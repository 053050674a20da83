//! SQL statements for the report table
//!
//! Values are bound as `text` or `float8` and cast explicitly to the
//! column's catalog type, so integer, numeric and date columns load the same
//! way character columns do. Report dates are `DD/MM/YYYY` and go through
//! `to_date` / `to_timestamp` instead of relying on `DateStyle`.

use crate::adapters::database::traits::LoadColumn;
use crate::config::Coercion;
use std::collections::HashMap;

/// Column names of a table in the current schema, in ordinal order
pub const COLUMNS_QUERY: &str = "SELECT column_name::text \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND lower(table_name) = lower($1) \
     ORDER BY ordinal_position";

/// Catalog name of a table in the current schema
pub const TABLE_NAME_QUERY: &str = "SELECT table_name::text \
     FROM information_schema.tables \
     WHERE table_schema = current_schema() AND lower(table_name) = lower($1) \
     LIMIT 1";

/// Column name and castable type name (without length or precision) of a
/// table resolved through [`TABLE_NAME_QUERY`]
pub const COLUMN_TYPES_QUERY: &str = "SELECT column_name::text, \
     CASE WHEN data_type IN ('USER-DEFINED', 'ARRAY') THEN udt_name::text \
          ELSE data_type::text END \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1";

const REPORT_DATE_FORMAT: &str = "DD/MM/YYYY";

const NUMERIC_TYPES: [&str; 6] = [
    "smallint",
    "integer",
    "bigint",
    "numeric",
    "real",
    "double precision",
];

/// Catalog types keyed by lowercase column name
#[derive(Debug, Clone, Default)]
pub struct ColumnTypes(HashMap<String, String>);

impl ColumnTypes {
    /// Build from `(column, type)` catalog rows
    pub fn from_rows(rows: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(
            rows.into_iter()
                .map(|(name, data_type)| (name.to_lowercase(), data_type.to_lowercase()))
                .collect(),
        )
    }

    /// Type of `column`; `None` when the catalog did not list it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(&column.to_lowercase()).map(String::as_str)
    }
}

fn is_character(data_type: &str) -> bool {
    data_type == "text" || data_type.starts_with("character")
}

/// Parameter expression for `$position` loaded into a column of `data_type`
///
/// Unknown types keep the plain bound type and leave conversion to the
/// server's assignment casts.
pub fn value_expression(position: usize, coercion: Coercion, data_type: Option<&str>) -> String {
    let param = match coercion {
        Coercion::Numeric => format!("${position}::float8"),
        Coercion::Passthrough => format!("${position}::text"),
    };

    let Some(data_type) = data_type else {
        return param;
    };

    match (coercion, data_type) {
        (Coercion::Passthrough, t) if is_character(t) => param,
        (Coercion::Numeric, t) if is_character(t) => format!("{param}::text"),
        (Coercion::Numeric, t) if NUMERIC_TYPES.contains(&t) => format!("{param}::{t}"),
        (Coercion::Numeric, _) => param,
        (Coercion::Passthrough, "date") => format!("to_date({param}, '{REPORT_DATE_FORMAT}')"),
        (Coercion::Passthrough, t) if t.starts_with("timestamp") => {
            format!("to_timestamp({param}, '{REPORT_DATE_FORMAT}')::{t}")
        }
        (Coercion::Passthrough, t) => format!("{param}::{t}"),
    }
}

/// Quote an identifier, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `DELETE` of every row holding the month reference in `$1`
pub fn delete_statement(table: &str, month_ref_column: &str, types: &ColumnTypes) -> String {
    format!(
        "DELETE FROM {} WHERE {} = {}",
        quote_identifier(table),
        quote_identifier(month_ref_column),
        value_expression(1, Coercion::Passthrough, types.get(month_ref_column))
    )
}

/// Single-row `INSERT` over `columns`, one parameter per column
pub fn insert_statement(table: &str, columns: &[LoadColumn], types: &ColumnTypes) -> String {
    let names: Vec<String> = columns
        .iter()
        .map(|column| quote_identifier(&column.name))
        .collect();

    let params: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| value_expression(idx + 1, column.coercion, types.get(&column.name)))
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        names.join(", "),
        params.join(", ")
    )
}
