use sheetdiff_engine::Row;

/// A loaded tabular source: the rows plus the column names derived from
/// the header row, in header order.
#[derive(Debug, Clone)]
pub struct Table {
    /// Sheet name (Excel) or file stem (CSV).
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// First `n` rows, for the pick-a-key preview the UI shows before
    /// running an engine.
    pub fn preview(&self, n: usize) -> &[Row] {
        &self.rows[..self.rows.len().min(n)]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Header cell → column name. Blank headers get a positional placeholder
/// so every column stays addressable as a key.
pub(crate) fn header_name(raw: &str, index: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("column{}", index + 1)
    } else {
        trimmed.to_string()
    }
}
