//! Ingestion of the visual-field source export.
//!
//! Reads a CSV export into [`vf_model::SourceRow`] values. Structural
//! problems (unreadable file, missing required columns) are fatal; row
//! level problems are recorded as [`vf_model::RowIssue`]s and never abort
//! the run.

pub mod csv_source;
pub mod dates;

pub use csv_source::{IngestError, Ingested, REQUIRED_COLUMNS, read_cohort_csv};
pub use dates::parse_date;
