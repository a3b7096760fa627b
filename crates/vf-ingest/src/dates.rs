//! Date parsing for the source export.
//!
//! The instrument export mixes date conventions depending on which site
//! produced the file, so parsing tries a fixed list of formats in order.
//! Ambiguous day/month values resolve to the first matching format (ISO
//! and US conventions are tried before day-first ones).

use chrono::NaiveDate;

/// Accepted date formats, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // ISO: 2024-01-15
    "%Y/%m/%d", // 2024/01/15
    "%m/%d/%Y", // US: 01/15/2024
    "%d-%b-%Y", // 15-Jan-2024
    "%Y%m%d",   // Compact: 20240115
];

/// Parse a date cell, returning `None` for empty or unparseable values.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Datetime cells occasionally appear; keep the date portion.
    let date_part = trimmed
        .split_once(['T', ' '])
        .map_or(trimmed, |(date, _)| date);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}
