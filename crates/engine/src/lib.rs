//! `sheetdiff-engine` — Tabular reconciliation and aggregation engines.
//!
//! Pure engine crate: receives pre-loaded rows, returns labeled results.
//! No CLI or IO dependencies. Three sibling engines share only the `Row`
//! data model and never mutate their inputs:
//!
//! - [`reconcile`] classifies every row of two tables as kept, added,
//!   deleted or updated under a selectable source-of-truth policy.
//! - [`distinct`] keeps the first row per composite key, projected to the
//!   key columns.
//! - [`group_count`] is `SELECT keys…, COUNT(*) … GROUP BY keys…`.

pub mod distinct;
pub mod error;
pub mod group;
pub mod model;
pub mod reconcile;

pub use distinct::distinct;
pub use error::EngineError;
pub use group::group_count;
pub use model::{ReconLabel, Row, SourceOfTruth, Value, COUNT_COLUMN, RESULT_COLUMN};
pub use reconcile::reconcile;
