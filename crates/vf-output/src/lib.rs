//! Output stage: write the prepared cohort to CSV.

pub mod csv_export;

pub use csv_export::{OutputError, write_cohort_csv};
