//! `sheetdiff-io` — File I/O around the sheetdiff engines.
//!
//! Loads tabular sources (CSV, Excel) into the engine's `Row` model and
//! exports result collections back to XLSX. The engines themselves never
//! touch files; everything path-shaped lives here.

pub mod csv;
pub mod export;
pub mod naming;
pub mod table;
pub mod xlsx;

pub use export::{export, ExportOptions};
pub use naming::dated_file_name;
pub use table::Table;
