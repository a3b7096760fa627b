//! The cohort transformer.
//!
//! Pure, single-pass transformation stages over in-memory rows:
//! filter by test pattern, derive age, assign per-subject/eye sequence
//! counters, project to the output schema. Each stage is independently
//! testable; [`pipeline::run`] composes them.

pub mod age;
pub mod filter;
pub mod pipeline;
pub mod sequence;

pub use age::derive_age;
pub use filter::filter_by_pattern;
pub use pipeline::run;
pub use sequence::assign_sequence;
