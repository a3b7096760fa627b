//! CLI library components for the visual-field cohort preparation tool.

pub mod logging;
pub mod pipeline;
pub mod types;
