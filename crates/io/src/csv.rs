// CSV/TSV import

use std::io::Read;
use std::path::Path;

use sheetdiff_engine::{Row, Value};

use crate::table::{header_name, Table};

pub fn import(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&table_name(path), &content, delimiter)
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&table_name(path), &content, delimiter)
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string())
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter from the first few lines.
///
/// Each candidate is scored by how consistently it splits the sample into
/// the same multi-field count as line 1; a higher field count breaks ties.
fn sniff_delimiter(content: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];

    let sample = content
        .lines()
        .take(10)
        .collect::<Vec<_>>()
        .join("\n");

    let mut best = b',';
    let mut best_score = 0u64;

    for delim in CANDIDATES {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(sample.as_bytes());
        let counts: Vec<usize> = reader
            .records()
            .filter_map(|r| r.ok())
            .map(|r| r.len())
            .collect();

        let Some(&target) = counts.first() else { continue };
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn import_from_string(name: &str, content: &str, delimiter: u8) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(h, i))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        let mut row = Row::new();
        for (i, column) in columns.iter().enumerate() {
            // Short records pad out with Empty
            row.insert(column.clone(), Value::from_input(record.get(i).unwrap_or("")));
        }
        if row.iter().all(|(_, v)| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(Table {
        name: name.to_string(),
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn import_types_fields_from_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name,age,active\nAlice,30,true\nBob,25,false\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.name, "people");
        assert_eq!(table.columns, vec!["name", "age", "active"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("name"), Some(&Value::Text("Alice".into())));
        assert_eq!(table.rows[0].get("age"), Some(&Value::Number(30.0)));
        assert_eq!(table.rows[1].get("active"), Some(&Value::Bool(false)));
    }

    #[test]
    fn sniffs_semicolon_and_tab() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc\n1\t2\t3\n"), b'\t');
        assert_eq!(sniff_delimiter("a|b|c\n1|2|3\n"), b'|');
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
    }

    #[test]
    fn sniffs_semicolon_with_commas_in_quoted_fields() {
        let content = "name;address\n\"Doe, Jane\";\"1 Main St, Apt 4\"\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn short_records_pad_with_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "a,b,c\n1,2\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.rows[0].get("c"), Some(&Value::Empty));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaps.csv");
        fs::write(&path, "a,b\n1,2\n,\n3,4\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn windows_1252_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "café" with 0xE9 (Windows-1252 é), invalid as UTF-8
        fs::write(&path, [b"name\ncaf".as_slice(), &[0xE9], b"\n"].concat()).unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.rows[0].get("name"), Some(&Value::Text("café".into())));
    }

    #[test]
    fn blank_header_cells_get_placeholders() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anon.csv");
        fs::write(&path, "a,,c\n1,2,3\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.columns, vec!["a", "column2", "c"]);
    }
}
