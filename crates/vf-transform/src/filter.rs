//! Test-pattern filtering.

use tracing::debug;
use vf_model::SourceRow;

/// Keep only rows whose `test_pattern` exactly equals `pattern`.
///
/// Matching is case-sensitive with no normalization: the source encodes
/// protocols as fixed literals ("24-2", "30-2", ...) and anything that
/// deviates is a different protocol, not a spelling variant.
#[must_use]
pub fn filter_by_pattern(rows: Vec<SourceRow>, pattern: &str) -> Vec<SourceRow> {
    let before = rows.len();
    let kept: Vec<SourceRow> = rows
        .into_iter()
        .filter(|row| row.test_pattern == pattern)
        .collect();
    debug!(pattern, before, after = kept.len(), "pattern filter applied");
    kept
}
