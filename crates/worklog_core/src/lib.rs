//! Core logic for the daily work log.
//! This crate is the single source of truth for routing and merge invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod router;
pub mod service;
pub mod store;

pub use config::{ConfigError, WorkLogConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day::format_day;
pub use model::entry::Entry;
pub use model::sheet::{Column, SheetRow, DEFAULT_HEADER, FIRST_DATA_ROW, HEADER_ROW};
pub use router::daily::{find_day_row, route, RouteDecision, RowTarget};
pub use service::sync_service::{apply_entry, SyncError, SyncOutcome, WorkLogService};
pub use store::{SqliteSheetStore, StoreError, StoreResult, TabularStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
