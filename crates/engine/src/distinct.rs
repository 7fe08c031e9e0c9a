use std::collections::HashSet;

use crate::error::EngineError;
use crate::model::{composite_key, Row};

/// Keep the first row per distinct composite key, projected to the key
/// columns.
///
/// Rows are scanned in input order; the first occurrence of each composite
/// key wins and later occurrences are skipped entirely. Output rows carry
/// only the `key_columns` (in the given order) — all other columns are
/// dropped. Output order is first-occurrence order, so the operation is
/// idempotent over its own result.
pub fn distinct(rows: &[Row], key_columns: &[String]) -> Result<Vec<Row>, EngineError> {
    if rows.is_empty() {
        return Err(EngineError::NotReady("table has no rows".into()));
    }
    if key_columns.is_empty() {
        return Err(EngineError::InvalidArgument("no key columns supplied".into()));
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut result: Vec<Row> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let key = composite_key(row, key_columns, i)?;
        if seen.insert(key) {
            result.push(project(row, key_columns));
        }
    }

    Ok(result)
}

/// Projection of `row` onto `key_columns`, in key order. Columns were
/// validated by `composite_key` already.
fn project(row: &Row, key_columns: &[String]) -> Row {
    Row::from_pairs(
        key_columns
            .iter()
            .map(|col| (col.clone(), row.get(col).cloned().unwrap_or_default())),
    )
}
