//! Tabular store contract and persistence implementations.
//!
//! # Responsibility
//! - Define the row/cell contract the router and service operate over.
//! - Keep SQLite details inside the persistence boundary.
//!
//! # Invariants
//! - Row 0 is the header row; it is present before any write and never
//!   shifted by `insert_row`.
//! - Reading an unset cell is not an error; it yields `""`.
//! - `save` replaces the whole persisted sheet or nothing.

use crate::model::sheet::{Column, SheetRow};
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod sqlite_sheet;

pub use sqlite_sheet::SqliteSheetStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store open, mutation and save operations.
#[derive(Debug)]
pub enum StoreError {
    /// Directory creation or file access failed.
    Io { path: PathBuf, source: io::Error },
    /// The backing file exists but is not a usable sheet document.
    Format(String),
    /// Sheet names must contain at least one non-whitespace character.
    InvalidSheetName(String),
    /// Row index outside the current sheet.
    RowOutOfRange { row: usize, len: usize },
    /// Storage engine failure while reading or saving.
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
            Self::Format(message) => write!(f, "unreadable sheet document: {message}"),
            Self::InvalidSheetName(name) => write!(f, "invalid sheet name: `{name}`"),
            Self::RowOutOfRange { row, len } => {
                write!(f, "row {row} is out of range for sheet with {len} rows")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::Format(_) | Self::InvalidSheetName(_) | Self::RowOutOfRange { .. } => None,
        }
    }
}

impl StoreError {
    /// Classifies an engine error raised while working on the file at `path`.
    ///
    /// File-level failures (open, read/write, permissions, full disk) become
    /// `Io`; a file that is not a database becomes `Format`.
    pub(crate) fn from_sqlite(err: rusqlite::Error, path: Option<&Path>) -> Self {
        let code = match &err {
            rusqlite::Error::SqliteFailure(inner, _) => Some(inner.code),
            _ => None,
        };
        match (code, path) {
            (Some(ErrorCode::NotADatabase), _) => Self::Format(err.to_string()),
            (Some(code), Some(path)) => match io_error_kind(code) {
                Some(kind) => Self::Io {
                    path: path.to_path_buf(),
                    source: io::Error::new(kind, err.to_string()),
                },
                None => Self::Sqlite(err),
            },
            _ => Self::Sqlite(err),
        }
    }
}

fn io_error_kind(code: ErrorCode) -> Option<io::ErrorKind> {
    match code {
        ErrorCode::PermissionDenied | ErrorCode::ReadOnly => Some(io::ErrorKind::PermissionDenied),
        ErrorCode::CannotOpen | ErrorCode::SystemIoFailure | ErrorCode::DiskFull => {
            Some(io::ErrorKind::Other)
        }
        _ => None,
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::from_sqlite(value, None)
    }
}

/// Row/cell access over one working sheet.
///
/// Implementations hold the whole sheet in memory; mutations become durable
/// only on `save`.
pub trait TabularStore {
    /// All rows in stored order, header included.
    fn rows(&self) -> &[SheetRow];

    /// Cell text, or `""` when the cell (or the row) was never set.
    fn cell(&self, row: usize, column: Column) -> &str {
        self.rows()
            .get(row)
            .map(|stored| stored.get(column))
            .unwrap_or("")
    }

    /// Overwrites one cell of an existing row.
    fn set_cell(&mut self, row: usize, column: Column, value: &str) -> StoreResult<()>;

    /// Inserts an empty row at `at`, shifting rows at or after it down by one.
    fn insert_row(&mut self, at: usize) -> StoreResult<()>;

    /// Persists the in-memory sheet, fully replacing the stored one.
    fn save(&mut self) -> StoreResult<()>;
}
