//! Input and output row types for the cohort pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// One parsed row of the source export.
///
/// Identifier fields (`subject_id`, `eye`) are guaranteed non-empty by the
/// ingest layer; rows missing either are rejected there. Dates are `None`
/// when the source cell was empty or unparseable.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// De-identified patient identifier.
    pub subject_id: String,
    /// Eye code as it appears in the source (e.g. "lefteye", "OD").
    pub eye: String,
    /// Date the visual-field test was performed.
    pub exam_date: Option<NaiveDate>,
    /// Patient date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Test protocol identifier (e.g. "24-2").
    pub test_pattern: String,
    /// Reference to the exam report PDF.
    pub pdf_filename: String,
    /// Reference to the raw instrument export file.
    pub source_filename: String,
    /// 1-based position in the source file, used as the deterministic
    /// tie-break when exam dates are equal or missing.
    pub row_number: usize,
}

/// One row of the prepared cohort output.
///
/// Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortRow {
    pub subject_id: String,
    pub eye: String,
    /// Age in years at the exam date, `(exam_date - birth_date) / 365.25`.
    /// Empty in the output when either date is missing or the pair is
    /// inverted.
    pub age: Option<f64>,
    pub birth_date: Option<NaiveDate>,
    pub exam_date: Option<NaiveDate>,
    pub pdf_filename: String,
    pub source_filename: String,
    /// Total tests for this subject/eye after filtering.
    pub visual_field_count: usize,
    /// 1-based rank of this test within the subject/eye group, ordered by
    /// exam date ascending.
    pub visual_field_number: usize,
}

impl CohortRow {
    /// Grouping key shared by all tests of one eye of one patient.
    #[must_use]
    pub fn group_key(&self) -> (&str, &str) {
        (self.subject_id.as_str(), self.eye.as_str())
    }
}

/// Output column names, in column order.
///
/// Must stay in sync with the field order of [`CohortRow`]; the output
/// writer uses this for header-only files when no rows matched.
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "subject_id",
    "eye",
    "age",
    "birth_date",
    "exam_date",
    "pdf_filename",
    "source_filename",
    "visual_field_count",
    "visual_field_number",
];
