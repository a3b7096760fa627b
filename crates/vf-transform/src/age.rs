//! Age derivation.

use chrono::NaiveDate;
use tracing::warn;

/// Mean calendar-year length used for age-in-years conversion.
const DAYS_PER_YEAR: f64 = 365.25;

/// Age in fractional years at `exam_date` for a patient born on
/// `birth_date`: `(exam_date - birth_date) in days / 365.25`.
///
/// Returns `None` when either date is missing, or when the dates are
/// inverted (exam before birth) — corrupt date pairs propagate null the
/// same way missing ones do, never a negative age.
#[must_use]
pub fn derive_age(birth_date: Option<NaiveDate>, exam_date: Option<NaiveDate>) -> Option<f64> {
    let birth = birth_date?;
    let exam = exam_date?;
    if exam < birth {
        warn!(%birth, %exam, "exam date precedes birth date, propagating null age");
        return None;
    }
    Some((exam - birth).num_days() as f64 / DAYS_PER_YEAR)
}
