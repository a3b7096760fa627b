//! CSV export with atomic replace.
//!
//! The file is written to a temporary sibling in the destination
//! directory and renamed over the target once complete, so a failed run
//! never leaves a truncated output behind.

use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use vf_model::{CohortRow, OUTPUT_COLUMNS};

/// Fatal output failures.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Write the prepared cohort to `path`, replacing any existing file.
///
/// The header row is always written; an empty `rows` slice produces a
/// header-only file.
///
/// # Errors
///
/// Fails when the destination directory is unwritable or the rename
/// cannot complete. The target file is untouched on failure.
pub fn write_cohort_csv(path: &Path, rows: &[CohortRow]) -> Result<(), OutputError> {
    let io_error = |source: std::io::Error| OutputError::Io {
        path: path.display().to_string(),
        source,
    };
    let csv_error = |source: csv::Error| OutputError::Csv {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir).map_err(io_error)?;

    {
        let mut writer = csv::Writer::from_writer(temp.as_file());
        if rows.is_empty() {
            // Serialization would emit the header lazily; with no rows we
            // still owe the downstream consumer a header.
            writer.write_record(OUTPUT_COLUMNS).map_err(csv_error)?;
        } else {
            for row in rows {
                writer.serialize(row).map_err(csv_error)?;
            }
        }
        writer.flush().map_err(io_error)?;
    }

    temp.persist(path).map_err(|error| io_error(error.error))?;
    info!(path = %path.display(), rows = rows.len(), "cohort written");
    Ok(())
}
