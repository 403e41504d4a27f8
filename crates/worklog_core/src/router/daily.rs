//! Same-day row routing.
//!
//! A day's content is collected into a single row keyed by the Date column.
//! The first row (in stored order) carrying today's day key wins; when no row
//! matches, a new row is placed directly below the header so the newest day
//! stays on top.

use crate::model::day::format_day;
use crate::model::entry::Entry;
use crate::model::sheet::{Column, SheetRow, FIRST_DATA_ROW};
use chrono::Datelike;
use log::debug;

/// Where routed content lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// Merge into the existing row at this index.
    Existing(usize),
    /// Insert a new row at this index, then write into it.
    InsertAt(usize),
}

/// Routing result for one content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub column: Column,
    pub target: RowTarget,
    /// Cleaned payload to write.
    pub payload: String,
    /// Day key the target row carries (or will carry).
    pub day_key: String,
}

/// Routes `content` for `today` against the current sheet rows.
pub fn route(content: &str, today: &impl Datelike, rows: &[SheetRow]) -> RouteDecision {
    let entry = Entry::classify(content);
    let day_key = format_day(today);
    let target = find_day_row(rows, &day_key)
        .map(RowTarget::Existing)
        .unwrap_or(RowTarget::InsertAt(FIRST_DATA_ROW));

    debug!(
        "event=route module=router column={} target={:?} content_chars={}",
        entry.column(),
        target,
        content.chars().count()
    );

    RouteDecision {
        column: entry.column(),
        target,
        payload: entry.into_payload(),
        day_key,
    }
}

/// Index of the first data row whose Date cell equals `day_key`.
pub fn find_day_row(rows: &[SheetRow], day_key: &str) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(FIRST_DATA_ROW)
        .find(|(_, row)| row.raw(Column::Date) == Some(day_key))
        .map(|(idx, _)| idx)
}
