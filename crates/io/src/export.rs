// XLSX result export

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use sheetdiff_engine::{Row, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Freeze row 1 and set an autofilter spanning all columns of row 1.
    pub freeze_header: bool,
}

/// Write `rows` to a single-sheet XLSX file at `path`.
///
/// The header is the ordered union of every row's columns — reconciliation
/// output legitimately mixes the shapes of both input tables, and a row
/// simply leaves cells blank for columns it does not carry.
pub fn export(rows: &[Row], path: &Path, options: &ExportOptions) -> Result<(), String> {
    let columns = column_union(rows);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, name)
            .map_err(|e| format!("Failed to write header '{name}': {e}"))?;
    }

    for (r, row) in rows.iter().enumerate() {
        let out_row = (r + 1) as u32;
        for (c, column) in columns.iter().enumerate() {
            let out_col = c as u16;
            match row.get(column) {
                None | Some(Value::Empty) => {}
                Some(Value::Text(s)) => {
                    worksheet
                        .write_string(out_row, out_col, s)
                        .map_err(|e| format!("Failed to write cell: {e}"))?;
                }
                Some(Value::Number(n)) => {
                    worksheet
                        .write_number(out_row, out_col, *n)
                        .map_err(|e| format!("Failed to write cell: {e}"))?;
                }
                Some(Value::Bool(b)) => {
                    worksheet
                        .write_boolean(out_row, out_col, *b)
                        .map_err(|e| format!("Failed to write cell: {e}"))?;
                }
            }
        }
    }

    if options.freeze_header && !columns.is_empty() {
        worksheet
            .autofilter(0, 0, 0, (columns.len() - 1) as u16)
            .map_err(|e| format!("Failed to set autofilter: {e}"))?;
        worksheet
            .set_freeze_panes(1, 0)
            .map_err(|e| format!("Failed to freeze header row: {e}"))?;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {e}"))?;

    Ok(())
}

/// Ordered union of the rows' columns, first encounter wins the position.
fn column_union(rows: &[Row]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for col in row.columns() {
            if seen.insert(col) {
                columns.push(col.to_string());
            }
        }
    }
    columns
}
