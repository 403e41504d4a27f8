//! Work log sync use-case.
//!
//! # Responsibility
//! - Run one full read-modify-write cycle per incoming content item.
//! - Merge same-day content into one row, inserting new day rows on top.
//!
//! # Invariants
//! - Every `sync` call appends; identical content on the same day is written
//!   twice.
//! - Merged cell values join prior and new content with a single `\n`.
//! - Nothing is persisted unless the whole cycle succeeds.
//!
//! # Concurrency
//! - No file locking is applied. Callers that sync the same store from more
//!   than one writer must serialize calls themselves.

use crate::config::{ConfigError, WorkLogConfig};
use crate::model::sheet::{Column, SheetRow};
use crate::router::daily::{route, RowTarget};
use crate::store::{SqliteSheetStore, StoreError, TabularStore};
use chrono::{Datelike, Local, NaiveDate};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for sync use-cases.
#[derive(Debug)]
pub enum SyncError {
    /// Service configuration cannot be used.
    Config(ConfigError),
    /// Store open, mutation or save failure.
    Store(StoreError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SyncError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for SyncError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What one sync wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Column that received the content.
    pub column: Column,
    /// Row index that received the content.
    pub row: usize,
    /// Whether a new day row was inserted.
    pub inserted: bool,
    /// Full cell value after the merge.
    pub value: String,
}

/// Applies one content item to `store` in memory, without saving.
///
/// New day rows get the day key and the payload; existing rows get the
/// payload appended to the target cell.
pub fn apply_entry<S: TabularStore>(
    store: &mut S,
    content: &str,
    today: &impl Datelike,
) -> Result<SyncOutcome, StoreError> {
    let decision = route(content, today, store.rows());

    match decision.target {
        RowTarget::InsertAt(row) => {
            store.insert_row(row)?;
            store.set_cell(row, Column::Date, &decision.day_key)?;
            store.set_cell(row, decision.column, &decision.payload)?;
            Ok(SyncOutcome {
                column: decision.column,
                row,
                inserted: true,
                value: decision.payload,
            })
        }
        RowTarget::Existing(row) => {
            let value = merge_cell(store.cell(row, decision.column), &decision.payload);
            store.set_cell(row, decision.column, &value)?;
            Ok(SyncOutcome {
                column: decision.column,
                row,
                inserted: false,
                value,
            })
        }
    }
}

fn merge_cell(existing: &str, payload: &str) -> String {
    if existing.is_empty() {
        payload.to_string()
    } else {
        format!("{existing}\n{payload}")
    }
}

/// Sync facade over the configured work log store.
pub struct WorkLogService {
    config: WorkLogConfig,
}

impl WorkLogService {
    /// Creates a service for `config`.
    ///
    /// # Errors
    /// - Returns `SyncError::Config` when `config.validate()` fails.
    pub fn new(config: WorkLogConfig) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Routes and merges `content` into the row for `today`, then saves.
    pub fn sync(&self, content: &str, today: NaiveDate) -> Result<SyncOutcome, SyncError> {
        let started_at = Instant::now();
        info!(
            "event=work_sync module=service status=start content_chars={}",
            content.chars().count()
        );

        let result = self.sync_inner(content, today);
        match &result {
            Ok(outcome) => info!(
                "event=work_sync module=service status=ok column={} row={} inserted={} duration_ms={}",
                outcome.column,
                outcome.row,
                outcome.inserted,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=work_sync module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// `sync` using the local calendar date.
    pub fn sync_today(&self, content: &str) -> Result<SyncOutcome, SyncError> {
        self.sync(content, Local::now().date_naive())
    }

    /// Reads all persisted rows, header included.
    pub fn rows(&self) -> Result<Vec<SheetRow>, SyncError> {
        let store = self.open_store()?;
        Ok(store.rows().to_vec())
    }

    fn sync_inner(&self, content: &str, today: NaiveDate) -> Result<SyncOutcome, SyncError> {
        let mut store = self.open_store()?;
        let outcome = apply_entry(&mut store, content, &today)?;
        store.save()?;
        Ok(outcome)
    }

    fn open_store(&self) -> Result<SqliteSheetStore, StoreError> {
        SqliteSheetStore::open(
            &self.config.path,
            self.config.sheet.as_str(),
            self.config.header_row(),
        )
    }
}
