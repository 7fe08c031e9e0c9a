use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A required input collection has no rows.
    NotReady(String),
    /// Caller supplied unusable arguments (e.g. no key columns).
    InvalidArgument(String),
    /// A requested key column is absent from an input row.
    MissingColumn { column: String, row: usize },
    /// Input already contains a column reserved for engine output.
    ReservedColumn(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady(what) => write!(f, "not ready: {what}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::MissingColumn { column, row } => {
                write!(f, "row {row}: missing key column '{column}'")
            }
            Self::ReservedColumn(column) => {
                write!(f, "input already contains reserved column '{column}'")
            }
        }
    }
}

impl std::error::Error for EngineError {}
