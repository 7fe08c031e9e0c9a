use std::collections::HashMap;

use crate::error::EngineError;
use crate::model::{composite_key, Row, Value, COUNT_COLUMN};

/// Group rows by composite key and count them, like
/// `SELECT keys…, COUNT(*) FROM rows GROUP BY keys…`.
///
/// One left-to-right pass: the first row of each distinct composite key
/// opens a bucket holding the key column values plus a [`COUNT_COLUMN`] of
/// 1; every later row with the same key increments that bucket. Buckets
/// are located by the full composite key, so grouping on `(a, b)` never
/// merges rows that share only `a`. Output order is first-occurrence
/// order, and the counts always sum to the input row count.
pub fn group_count(rows: &[Row], key_columns: &[String]) -> Result<Vec<Row>, EngineError> {
    if rows.is_empty() {
        return Err(EngineError::NotReady("table has no rows".into()));
    }
    if key_columns.is_empty() {
        return Err(EngineError::InvalidArgument("no key columns supplied".into()));
    }
    if rows.iter().any(|row| row.contains_column(COUNT_COLUMN)) {
        return Err(EngineError::ReservedColumn(COUNT_COLUMN.into()));
    }

    // Composite key → index of its bucket in the output.
    let mut buckets: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<Row> = Vec::new();
    let mut counts: Vec<u64> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let key = composite_key(row, key_columns, i)?;
        match buckets.get(&key) {
            Some(&pos) => counts[pos] += 1,
            None => {
                buckets.insert(key, result.len());
                counts.push(1);
                result.push(Row::from_pairs(
                    key_columns
                        .iter()
                        .map(|col| (col.clone(), row.get(col).cloned().unwrap_or_default())),
                ));
            }
        }
    }

    for (row, count) in result.iter_mut().zip(counts) {
        row.insert(COUNT_COLUMN, Value::Number(count as f64));
    }

    Ok(result)
}
