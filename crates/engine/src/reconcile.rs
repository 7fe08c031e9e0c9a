use std::collections::HashSet;

use crate::error::EngineError;
use crate::model::{key_token, ReconLabel, Row, SourceOfTruth, RESULT_COLUMN};

/// Classify every row of two tables as kept/added/deleted/updated.
///
/// `key_a` / `key_b` name the key column on each side; rows match when
/// their key tokens are equal. The side named by `truth` defines the
/// baseline: its rows come first in their original order, then the
/// unmatched rows of the other side are appended in theirs. Inputs are
/// read-only; the result holds fresh clones with the label written under
/// [`RESULT_COLUMN`].
///
/// The "does B contain this A key" test is a linear existence scan of B
/// per A row; only the reverse "does A contain this B key" test uses a
/// hash set.
pub fn reconcile(
    set_a: &[Row],
    key_a: &str,
    set_b: &[Row],
    key_b: &str,
    truth: SourceOfTruth,
) -> Result<Vec<Row>, EngineError> {
    if set_a.is_empty() {
        return Err(EngineError::NotReady("table A has no rows".into()));
    }
    if set_b.is_empty() {
        return Err(EngineError::NotReady("table B has no rows".into()));
    }
    if set_a
        .iter()
        .chain(set_b.iter())
        .any(|row| row.contains_column(RESULT_COLUMN))
    {
        return Err(EngineError::ReservedColumn(RESULT_COLUMN.into()));
    }

    // Key tokens are resolved up front so a missing column fails before any
    // output is produced.
    let keys_a = resolve_keys(set_a, key_a)?;
    let keys_b = resolve_keys(set_b, key_b)?;
    let a_key_set: HashSet<&str> = keys_a.iter().map(String::as_str).collect();

    match truth {
        SourceOfTruth::A => Ok(reconcile_by_a(set_a, &keys_a, set_b, &keys_b, &a_key_set)),
        SourceOfTruth::B => Ok(reconcile_by_b(set_a, &keys_a, set_b, &keys_b, &a_key_set)),
    }
}

fn resolve_keys(rows: &[Row], key_column: &str) -> Result<Vec<String>, EngineError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| key_token(row, key_column, i))
        .collect()
}

/// A is the baseline: every A row survives, labeled `kept`, then demoted to
/// `deleted` when its key has no match in B. Unmatched B rows are appended
/// as `added`; matched B rows are dropped (A's content wins).
fn reconcile_by_a(
    set_a: &[Row],
    keys_a: &[String],
    set_b: &[Row],
    keys_b: &[String],
    a_key_set: &HashSet<&str>,
) -> Vec<Row> {
    let mut result: Vec<Row> = set_a
        .iter()
        .map(|row| labeled(row, ReconLabel::Kept))
        .collect();

    for key in keys_a {
        if !keys_b.iter().any(|k| k == key) {
            // Demote the first result row carrying this key value; duplicate
            // keys in A collapse onto that first row.
            if let Some(pos) = keys_a.iter().position(|k| k == key) {
                result[pos].insert(RESULT_COLUMN, ReconLabel::Deleted.value());
            }
        }
    }

    for (j, row_b) in set_b.iter().enumerate() {
        if !a_key_set.contains(keys_b[j].as_str()) {
            result.push(labeled(row_b, ReconLabel::Added));
        }
    }

    result
}

/// B is the baseline: every B row is emitted (`updated` when its key exists
/// in A, else `added`), then A rows with no match anywhere in B are
/// appended as `deleted`.
fn reconcile_by_b(
    set_a: &[Row],
    keys_a: &[String],
    set_b: &[Row],
    keys_b: &[String],
    a_key_set: &HashSet<&str>,
) -> Vec<Row> {
    let mut result: Vec<Row> = Vec::with_capacity(set_b.len());

    for (j, row_b) in set_b.iter().enumerate() {
        let label = if a_key_set.contains(keys_b[j].as_str()) {
            ReconLabel::Updated
        } else {
            ReconLabel::Added
        };
        result.push(labeled(row_b, label));
    }

    for (i, row_a) in set_a.iter().enumerate() {
        if !keys_b.iter().any(|k| k == &keys_a[i]) {
            result.push(labeled(row_a, ReconLabel::Deleted));
        }
    }

    result
}

fn labeled(row: &Row, label: ReconLabel) -> Row {
    let mut out = row.clone();
    out.insert(RESULT_COLUMN, label.value());
    out
}
