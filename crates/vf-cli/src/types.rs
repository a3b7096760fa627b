use std::path::PathBuf;

use vf_model::RowIssue;

/// Outcome of one `prepare` run, consumed by the summary printer.
#[derive(Debug)]
pub struct PrepareResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub pattern: String,
    /// Data rows in the source, including skipped ones.
    pub rows_read: usize,
    /// Rows dropped for missing grouping keys.
    pub rows_skipped: usize,
    /// Rows matching the test pattern.
    pub rows_matched: usize,
    /// Distinct `(subject_id, eye)` groups in the output.
    pub group_count: usize,
    /// Size of the largest group.
    pub largest_group: usize,
    /// Row-level issues encountered during ingestion.
    pub issues: Vec<RowIssue>,
}
