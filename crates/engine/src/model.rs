use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Scalar values
// ---------------------------------------------------------------------------

/// A single cell value. Rows derive from spreadsheet-like sources, so the
/// scalar set is text, number, boolean or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Default for Value {
    fn default() -> Self {
        Value::Empty
    }
}

impl Value {
    /// Type a raw text field: empty → `Empty`, numeric → `Number`,
    /// true/false → `Bool`, anything else → `Text`.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Value::Empty;
        }

        if let Ok(num) = trimmed.parse::<f64>() {
            return Value::Number(num);
        }

        match trimmed {
            "true" | "TRUE" | "True" => Value::Bool(true),
            "false" | "FALSE" | "False" => Value::Bool(false),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    /// Canonical token used for key matching and composite-key joins.
    ///
    /// Numbers without a fractional part render as integers so that a CSV
    /// `42` and an Excel `42.0` produce the same key. Non-integer numbers
    /// are rendered exactly, never rounded.
    pub fn key_text(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One tabular record: an ordered column-name → value mapping.
///
/// Rows within one collection are not required to share identical column
/// sets (reconciliation output legitimately mixes the two input shapes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Row {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Insert or overwrite a column. Insertion order is preserved; an
    /// overwrite keeps the column's original position.
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.fields.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Composite keys
// ---------------------------------------------------------------------------

/// Joins composite-key parts. A control character keeps `"a-b" + "c"` and
/// `"a" + "b-c"` from colliding; it is not expected to occur in data.
pub const KEY_SEPARATOR: char = '\u{1F}';

/// Build the composite key for `row` from `key_columns`, in order.
///
/// Fails fast with `MissingColumn` when a requested column is absent from
/// the row; a column holding `Value::Empty` contributes an empty token and
/// is not an error. `row_index` only feeds the error message.
pub fn composite_key(
    row: &Row,
    key_columns: &[String],
    row_index: usize,
) -> Result<String, EngineError> {
    let mut parts = Vec::with_capacity(key_columns.len());
    for column in key_columns {
        let value = row.get(column).ok_or_else(|| EngineError::MissingColumn {
            column: column.clone(),
            row: row_index,
        })?;
        parts.push(value.key_text());
    }
    Ok(parts.join(&KEY_SEPARATOR.to_string()))
}

/// Single-column key token, with the same missing-column failure mode.
pub fn key_token(row: &Row, key_column: &str, row_index: usize) -> Result<String, EngineError> {
    row.get(key_column)
        .map(Value::key_text)
        .ok_or_else(|| EngineError::MissingColumn {
            column: key_column.to_string(),
            row: row_index,
        })
}

// ---------------------------------------------------------------------------
// Reconciliation labels
// ---------------------------------------------------------------------------

/// Reserved output column carrying the reconciliation label.
pub const RESULT_COLUMN: &str = "diff_result";

/// Reserved output column carrying the group-count aggregate.
pub const COUNT_COLUMN: &str = "count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconLabel {
    Kept,
    Added,
    Deleted,
    Updated,
}

impl ReconLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kept => "kept",
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Updated => "updated",
        }
    }

    pub fn value(&self) -> Value {
        Value::Text(self.as_str().to_string())
    }
}

impl std::fmt::Display for ReconLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which input table defines the baseline row set that survives in the
/// reconciliation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOfTruth {
    A,
    B,
}
