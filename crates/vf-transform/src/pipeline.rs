//! Stage composition for the cohort transformer.

use tracing::{info, warn};
use vf_model::{CohortRow, SourceRow};

use crate::filter::filter_by_pattern;
use crate::sequence::assign_sequence;

/// Run the full transformation: filter by test pattern, then group,
/// order, and number the surviving rows. Age derivation happens during
/// output-row construction; it does not depend on ordering.
///
/// An input with no matching rows yields an empty result (the caller
/// still writes a header-only file).
#[must_use]
pub fn run(rows: Vec<SourceRow>, pattern: &str) -> Vec<CohortRow> {
    let input_count = rows.len();
    let matched = filter_by_pattern(rows, pattern);
    if matched.is_empty() {
        warn!(pattern, input_count, "no records matched pattern");
        return Vec::new();
    }
    let out = assign_sequence(&matched);
    info!(
        pattern,
        input_count,
        output_count = out.len(),
        "cohort transform complete"
    );
    out
}
