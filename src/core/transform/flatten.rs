//! Record flattening
//!
//! Turns nested task records into flat columns:
//! - `{"status": {"status": "open"}}` → `"status_status"`
//! - `{"assignees": [{"username": "ana"}]}` → `"assignees_0"` → `"assignees_0_username"`
//!
//! Each pass expands every column that still holds an object or array, one
//! level at a time, until a pass finds nothing left to expand.

use super::frame::Frame;
use crate::domain::TaskRecord;
use serde_json::Value;

/// How a nested column gets expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expansion {
    /// Object values become `<column>_<key>` columns
    Mapping,
    /// Array values become `<column>_<index>` columns
    Sequence,
}

/// Flatten task records into a frame of scalar columns
///
/// # Examples
///
/// ```
/// use ouvidoria_sync::core::transform::flatten::flatten_records;
/// use serde_json::json;
///
/// let record = json!({"a": {"b": 1}, "c": [10, 20]});
/// let frame = flatten_records(vec![record.as_object().unwrap().clone()]);
///
/// assert_eq!(frame.value(0, "a_b"), &json!(1));
/// assert_eq!(frame.value(0, "c_0"), &json!(10));
/// assert_eq!(frame.value(0, "c_1"), &json!(20));
/// ```
pub fn flatten_records(records: Vec<TaskRecord>) -> Frame {
    let mut frame = Frame::from_records(records);
    flatten_frame(&mut frame);
    frame
}

/// Flatten a frame in place, returning the number of expansion passes
pub fn flatten_frame(frame: &mut Frame) -> usize {
    let mut passes = 0;

    loop {
        let worklist: Vec<(String, Expansion)> = frame
            .columns()
            .iter()
            .filter_map(|column| classify(frame, column).map(|kind| (column.clone(), kind)))
            .collect();

        if worklist.is_empty() {
            break;
        }

        for (column, _) in worklist {
            // An earlier expansion in this pass may have replaced the column
            match classify(frame, &column) {
                Some(Expansion::Mapping) => expand_mapping(frame, &column),
                Some(Expansion::Sequence) => expand_sequence(frame, &column),
                None => {}
            }
        }

        passes += 1;
        tracing::trace!(pass = passes, columns = frame.columns().len(), "Flatten pass");
    }

    passes
}

/// Mapping takes priority when a column mixes objects and arrays
fn classify(frame: &Frame, column: &str) -> Option<Expansion> {
    if frame.column_values(column).any(Value::is_object) {
        Some(Expansion::Mapping)
    } else if frame.column_values(column).any(Value::is_array) {
        Some(Expansion::Sequence)
    } else {
        None
    }
}

fn expand_mapping(frame: &mut Frame, column: &str) {
    let values = frame.take_column(column);

    let mut keys: Vec<String> = Vec::new();
    for value in &values {
        if let Value::Object(map) = value {
            for key in map.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
    }

    for key in &keys {
        let expanded = values.iter().map(|value| match value {
            Value::Object(map) => map.get(key).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        });
        let name = format!("{column}_{key}");
        frame.take_column(&name);
        frame.set_column(&name, expanded);
    }
}

fn expand_sequence(frame: &mut Frame, column: &str) {
    let values = frame.take_column(column);

    let width = values
        .iter()
        .map(|value| match value {
            Value::Array(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        })
        .max()
        .unwrap_or(0);

    for index in 0..width {
        let expanded = values.iter().map(|value| match value {
            Value::Array(items) => items.get(index).cloned().unwrap_or(Value::Null),
            Value::Null => Value::Null,
            scalar if index == 0 => scalar.clone(),
            _ => Value::Null,
        });
        let name = format!("{column}_{index}");
        frame.take_column(&name);
        frame.set_column(&name, expanded);
    }
}
