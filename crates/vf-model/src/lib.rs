//! Data model for visual-field cohort preparation.
//!
//! Defines the parsed input row, the projected output row, and the
//! row-level issue types shared by the ingest and transform crates.

pub mod issue;
pub mod record;

pub use issue::{IssueKind, RowIssue};
pub use record::{CohortRow, OUTPUT_COLUMNS, SourceRow};
