//! Column-oriented view over semi-structured rows
//!
//! A [`Frame`] keeps an ordered column list next to the rows. A column
//! missing from a row reads as null, so every row exposes the same column
//! set.

use crate::domain::TaskRecord;
use serde_json::Value;

static NULL: Value = Value::Null;

/// Ordered columns over a set of rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<TaskRecord>,
}

impl Frame {
    /// Builds a frame from records, ordering columns by first appearance
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self {
            columns,
            rows: records,
        }
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, each keyed by column name
    pub fn rows(&self) -> &[TaskRecord] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the column exists
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Value of `column` in row `row`, null when absent
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// Values of `column` across every row
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |r| r.get(column).unwrap_or(&NULL))
    }

    /// Sets `column` from one value per row, replacing an existing column
    ///
    /// New columns are appended; existing ones keep their position. Missing
    /// values (a shorter iterator) become null.
    pub fn set_column(&mut self, column: &str, values: impl IntoIterator<Item = Value>) {
        let mut values = values.into_iter();
        for row in &mut self.rows {
            match values.next() {
                Some(Value::Null) | None => {
                    row.remove(column);
                }
                Some(value) => {
                    row.insert(column.to_string(), value);
                }
            }
        }
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    /// Removes `column` and returns its values, one per row
    pub fn take_column(&mut self, column: &str) -> Vec<Value> {
        self.columns.retain(|c| c != column);
        self.rows
            .iter_mut()
            .map(|row| row.remove(column).unwrap_or(Value::Null))
            .collect()
    }

    /// Restricts and reorders the frame to `columns`
    ///
    /// Columns the frame doesn't have are synthesized as null and returned
    /// so callers can report them.
    pub fn select(&mut self, columns: &[String]) -> Vec<String> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| !self.has_column(c))
            .cloned()
            .collect();

        for row in &mut self.rows {
            row.retain(|key, _| columns.contains(key));
        }
        self.columns = columns.to_vec();
        missing
    }

    /// Renames columns; names not in the mapping pass through
    pub fn rename_columns(&mut self, mapping: &[(String, String)]) {
        for (from, to) in mapping {
            if from == to || !self.has_column(from) {
                continue;
            }
            let values = self.take_column(from);
            self.set_column(to, values);
        }
    }
}
