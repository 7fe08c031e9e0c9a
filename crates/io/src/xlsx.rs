// Excel file import (xlsx, xls, xlsb, ods)
//
// Import is a one-way conversion onto the engine's Row model: row 1 is the
// header, every later row becomes a Row keyed by the header names.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use sheetdiff_engine::{Row, Value};

use crate::table::{header_name, Table};

/// List the sheet names of a workbook, in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, String> {
    let workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open workbook '{}': {}", path.display(), e))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Import one sheet as a [`Table`]. `sheet = None` takes the first sheet.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Table, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open workbook '{}': {}", path.display(), e))?;

    let names = workbook.sheet_names().to_vec();
    if names.is_empty() {
        return Err("workbook has no sheets".to_string());
    }
    let sheet_name = match sheet {
        Some(s) => {
            if !names.iter().any(|n| n == s) {
                return Err(format!("workbook has no sheet named '{s}'"));
            }
            s.to_string()
        }
        None => names[0].clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{sheet_name}': {e}"))?;

    let mut row_iter = range.rows();
    let Some(header) = row_iter.next() else {
        return Err(format!("sheet '{sheet_name}' is empty"));
    };
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(&cell_to_value(cell).key_text(), i))
        .collect();

    let mut rows = Vec::new();
    for cells in row_iter {
        let mut row = Row::new();
        for (i, column) in columns.iter().enumerate() {
            let value = cells.get(i).map(cell_to_value).unwrap_or(Value::Empty);
            row.insert(column.clone(), value);
        }
        if row.iter().all(|(_, v)| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(Table {
        name: sheet_name,
        columns,
        rows,
    })
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Empty
            } else {
                Value::Text(trimmed.to_string())
            }
        }
        Data::Float(n) => Value::Number(*n),
        Data::Int(n) => Value::Number(*n as f64),
        Data::Bool(b) => Value::Bool(*b),
        // Error cells carry no usable value for matching
        Data::Error(_) => Value::Empty,
        // Serial number; keys built from the same workbook stay consistent
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Value::Text(s.clone()),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    fn write_fixture(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet().set_name("Data").unwrap();
        sheet.write_string(0, 0, "id").unwrap();
        sheet.write_string(0, 1, "name").unwrap();
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_string(1, 1, "Alice").unwrap();
        sheet.write_number(2, 0, 2.0).unwrap();
        sheet.write_string(2, 1, "Bob").unwrap();
        workbook.add_worksheet().set_name("Notes").unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn lists_sheet_names_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        write_fixture(&path);

        assert_eq!(sheet_names(&path).unwrap(), vec!["Data", "Notes"]);
    }

    #[test]
    fn imports_first_sheet_by_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        write_fixture(&path);

        let table = import(&path, None).unwrap();
        assert_eq!(table.name, "Data");
        assert_eq!(table.columns, vec!["id", "name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("id"), Some(&Value::Number(1.0)));
        assert_eq!(table.rows[1].get("name"), Some(&Value::Text("Bob".into())));
    }

    #[test]
    fn unknown_sheet_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        write_fixture(&path);

        let err = import(&path, Some("Missing")).unwrap_err();
        assert!(err.contains("Missing"), "unexpected error: {err}");
    }
}
