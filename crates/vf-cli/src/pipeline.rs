//! Cohort preparation pipeline with explicit stages.
//!
//! 1. **Ingest**: read and validate the source CSV
//! 2. **Transform**: filter, derive age, assign sequence counters
//! 3. **Output**: write the prepared CSV with atomic replace
//!
//! Each stage takes the output of the previous stage; fatal errors abort
//! the run before any output is written.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use vf_ingest::read_cohort_csv;
use vf_model::CohortRow;
use vf_output::write_cohort_csv;

use crate::types::PrepareResult;

/// Run the full preparation pipeline.
///
/// Row-level data problems surface in [`PrepareResult::issues`]; only
/// unreadable input, missing required columns, or an unwritable
/// destination return an error. A run with zero matching rows succeeds
/// and writes a header-only file.
pub fn prepare(input: &Path, output: &Path, pattern: &str) -> Result<PrepareResult> {
    let run_span = info_span!("prepare", input = %input.display(), pattern);
    let _run_guard = run_span.enter();

    let ingest_start = Instant::now();
    let ingested = info_span!("ingest")
        .in_scope(|| read_cohort_csv(input))
        .with_context(|| format!("ingest {}", input.display()))?;
    info!(
        rows_read = ingested.rows_read,
        rows_kept = ingested.rows.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );
    let rows_skipped = ingested.rows_read - ingested.rows.len();

    let transform_start = Instant::now();
    let cohort =
        info_span!("transform").in_scope(|| vf_transform::run(ingested.rows, pattern));
    info!(
        output_rows = cohort.len(),
        duration_ms = transform_start.elapsed().as_millis(),
        "transform complete"
    );

    let output_start = Instant::now();
    info_span!("output")
        .in_scope(|| write_cohort_csv(output, &cohort))
        .with_context(|| format!("write {}", output.display()))?;
    info!(
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );

    let (group_count, largest_group) = group_stats(&cohort);
    Ok(PrepareResult {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        pattern: pattern.to_string(),
        rows_read: ingested.rows_read,
        rows_skipped,
        rows_matched: cohort.len(),
        group_count,
        largest_group,
        issues: ingested.issues,
    })
}

/// Count distinct subject/eye groups and the largest one.
fn group_stats(rows: &[CohortRow]) -> (usize, usize) {
    let mut sizes: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for row in rows {
        *sizes.entry(row.group_key()).or_insert(0) += 1;
    }
    let largest = sizes.values().copied().max().unwrap_or(0);
    (sizes.len(), largest)
}
