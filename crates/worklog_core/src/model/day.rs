//! Day key formatting.
//!
//! The Date column stores `D/MM/YYYY`: unpadded day, zero-padded month,
//! unpadded year. Rows written by earlier runs are matched by exact text, so
//! this format must not change.

use chrono::Datelike;

/// Formats a date as the Date column day key, e.g. `5/07/2024`.
pub fn format_day(date: &impl Datelike) -> String {
    format!("{}/{:02}/{}", date.day(), date.month(), date.year())
}
