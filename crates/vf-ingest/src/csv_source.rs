//! CSV source reader for the cohort export.

use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::{debug, warn};

use vf_model::{IssueKind, RowIssue, SourceRow};

use crate::dates::parse_date;

/// Columns the source export must provide, matched case-insensitively.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "subject_id",
    "eye",
    "exam_date",
    "birth_date",
    "test_pattern",
    "pdf_filename",
    "source_filename",
];

/// Fatal ingestion failures. Anything row-level becomes a [`RowIssue`]
/// instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: String, column: &'static str },
}

/// Result of reading a source file: the rows that survived row-level
/// policy, plus every issue encountered along the way.
#[derive(Debug, Default)]
pub struct Ingested {
    pub rows: Vec<SourceRow>,
    pub issues: Vec<RowIssue>,
    /// Total data rows in the source, including skipped ones.
    pub rows_read: usize,
}

/// Resolved positions of the required columns in the header row.
struct ColumnIndex {
    subject_id: usize,
    eye: usize,
    exam_date: usize,
    birth_date: usize,
    test_pattern: usize,
    pdf_filename: usize,
    source_filename: usize,
}

/// Normalize a raw header cell: strip the BOM some exports carry, trim,
/// lowercase.
fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_lowercase()
}

fn resolve_columns(headers: &csv::StringRecord, path: &Path) -> Result<ColumnIndex, IngestError> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    let find = |column: &'static str| -> Result<usize, IngestError> {
        normalized
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| IngestError::MissingColumn {
                path: path.display().to_string(),
                column,
            })
    };
    Ok(ColumnIndex {
        subject_id: find("subject_id")?,
        eye: find("eye")?,
        exam_date: find("exam_date")?,
        birth_date: find("birth_date")?,
        test_pattern: find("test_pattern")?,
        pdf_filename: find("pdf_filename")?,
        source_filename: find("source_filename")?,
    })
}

/// Read the cohort export at `path`.
///
/// # Errors
///
/// Fails before any row is processed when the file cannot be read or a
/// required column is absent. Row-level problems (missing grouping keys,
/// bad dates) are reported through [`Ingested::issues`] instead.
pub fn read_cohort_csv(path: &Path) -> Result<Ingested, IngestError> {
    let read_error = |source: csv::Error| IngestError::Read {
        path: path.display().to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;
    let headers = reader.headers().map_err(read_error)?.clone();
    let columns = resolve_columns(&headers, path)?;

    let mut ingested = Ingested::default();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(read_error)?;
        let row_number = idx + 1;
        ingested.rows_read += 1;

        let cell = |col: usize| record.get(col).unwrap_or("").trim().to_string();

        let subject_id = cell(columns.subject_id);
        if subject_id.is_empty() {
            warn!(row_number, "missing subject_id, skipping row");
            ingested.issues.push(RowIssue {
                row_number,
                kind: IssueKind::MissingSubjectId,
            });
            continue;
        }
        let eye = cell(columns.eye);
        if eye.is_empty() {
            warn!(row_number, "missing eye, skipping row");
            ingested.issues.push(RowIssue {
                row_number,
                kind: IssueKind::MissingEye,
            });
            continue;
        }

        let mut date_field = |col: usize, column: &'static str| {
            let raw = cell(col);
            let parsed = parse_date(&raw);
            if parsed.is_none() {
                debug!(row_number, column, value = %raw, "date unavailable, propagating null");
                ingested.issues.push(RowIssue {
                    row_number,
                    kind: IssueKind::BadDate { column, value: raw },
                });
            }
            parsed
        };
        let exam_date = date_field(columns.exam_date, "exam_date");
        let birth_date = date_field(columns.birth_date, "birth_date");

        ingested.rows.push(SourceRow {
            subject_id,
            eye,
            exam_date,
            birth_date,
            test_pattern: cell(columns.test_pattern),
            pdf_filename: cell(columns.pdf_filename),
            source_filename: cell(columns.source_filename),
            row_number,
        });
    }

    debug!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_kept = ingested.rows.len(),
        issues = ingested.issues.len(),
        "source file read"
    );
    Ok(ingested)
}
