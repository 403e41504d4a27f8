//! SQLite-backed sheet store.
//!
//! # Responsibility
//! - Open (or lazily create) one sheet table inside a SQLite file.
//! - Materialize all rows in memory and rewrite them on `save`.
//!
//! # Invariants
//! - Sheet table shape is `row_idx, task, todo, note, date`; any other shape
//!   is reported as a format error, never repaired.
//! - `save` runs in one transaction, so a failed save leaves the previously
//!   persisted rows in place.
//! - A missing sheet table is created on first `save`, not on open.

use super::{StoreError, StoreResult, TabularStore};
use crate::model::sheet::{Column, SheetRow, HEADER_ROW};
use log::{error, info};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const SHEET_COLUMNS: [&str; 5] = ["row_idx", "task", "todo", "note", "date"];

/// Sheet store persisted as one table of a SQLite database file.
pub struct SqliteSheetStore {
    conn: Connection,
    path: Option<PathBuf>,
    sheet: String,
    rows: Vec<SheetRow>,
}

impl SqliteSheetStore {
    /// Opens `sheet` inside the database at `path`.
    ///
    /// Creates missing parent directories. When the file or the sheet table
    /// does not exist yet, the returned store holds only `header`.
    ///
    /// # Errors
    /// - `StoreError::Io` when parent directories cannot be created.
    /// - `StoreError::Format` when the file is not a database or the sheet
    ///   table has a foreign shape.
    pub fn open(
        path: impl AsRef<Path>,
        sheet: impl Into<String>,
        header: SheetRow,
    ) -> StoreResult<Self> {
        let path = path.as_ref();
        let sheet = checked_sheet_name(sheet.into())?;
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=file");

        let result = ensure_parent_dir(path)
            .and_then(|()| {
                Connection::open(path).map_err(|err| StoreError::from_sqlite(err, Some(path)))
            })
            .and_then(|conn| Self::bootstrap(conn, Some(path.to_path_buf()), sheet, header));
        log_open_result(&result, "file", started_at);
        result
    }

    /// Opens `sheet` inside a fresh in-memory database.
    pub fn open_in_memory(sheet: impl Into<String>, header: SheetRow) -> StoreResult<Self> {
        let sheet = checked_sheet_name(sheet.into())?;
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=memory");

        let result = Connection::open_in_memory()
            .map_err(StoreError::from)
            .and_then(|conn| Self::bootstrap(conn, None, sheet, header));
        log_open_result(&result, "memory", started_at);
        result
    }

    /// Backing file path, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Working sheet (table) name.
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    fn bootstrap(
        conn: Connection,
        path: Option<PathBuf>,
        sheet: String,
        header: SheetRow,
    ) -> StoreResult<Self> {
        let engine_error = |err: rusqlite::Error| StoreError::from_sqlite(err, path.as_deref());
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(engine_error)?;
        let mut rows = if sheet_exists(&conn, &sheet).map_err(engine_error)? {
            ensure_sheet_shape(&conn, &sheet)?;
            load_rows(&conn, &sheet).map_err(engine_error)?
        } else {
            Vec::new()
        };
        if rows.is_empty() {
            rows.push(header);
        }

        Ok(Self {
            conn,
            path,
            sheet,
            rows,
        })
    }

    fn check_row(&self, row: usize) -> StoreResult<()> {
        if row >= self.rows.len() {
            return Err(StoreError::RowOutOfRange {
                row,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}

impl TabularStore for SqliteSheetStore {
    fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    fn set_cell(&mut self, row: usize, column: Column, value: &str) -> StoreResult<()> {
        self.check_row(row)?;
        self.rows[row].set(column, value);
        Ok(())
    }

    fn insert_row(&mut self, at: usize) -> StoreResult<()> {
        if at == HEADER_ROW || at > self.rows.len() {
            return Err(StoreError::RowOutOfRange {
                row: at,
                len: self.rows.len(),
            });
        }
        self.rows.insert(at, SheetRow::empty());
        Ok(())
    }

    fn save(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = rewrite_sheet(&mut self.conn, &self.sheet, &self.rows)
            .map_err(|err| StoreError::from_sqlite(err, self.path.as_deref()));

        match &result {
            Ok(()) => info!(
                "event=store_save module=store status=ok rows={} duration_ms={}",
                self.rows.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn checked_sheet_name(sheet: String) -> StoreResult<String> {
    if sheet.trim().is_empty() {
        return Err(StoreError::InvalidSheetName(sheet));
    }
    Ok(sheet)
}

fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

// Table names resolve case-insensitively, so `sheet1` must find `Sheet1`.
fn sheet_exists(conn: &Connection, sheet: &str) -> rusqlite::Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1 COLLATE NOCASE
        );",
        [sheet],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_sheet_shape(conn: &Connection, sheet: &str) -> StoreResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid;")?;
    let names = stmt
        .query_map([sheet], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if names.iter().map(String::as_str).ne(SHEET_COLUMNS) {
        return Err(StoreError::Format(format!(
            "sheet `{sheet}` has columns [{}], expected [{}]",
            names.join(", "),
            SHEET_COLUMNS.join(", ")
        )));
    }
    Ok(())
}

fn load_rows(conn: &Connection, sheet: &str) -> rusqlite::Result<Vec<SheetRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT task, todo, note, date FROM {} ORDER BY row_idx ASC;",
        quote_ident(sheet)
    ))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SheetRow::from_cells([
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
            ]))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn rewrite_sheet(conn: &mut Connection, sheet: &str, rows: &[SheetRow]) -> rusqlite::Result<()> {
    let table = quote_ident(sheet);
    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            row_idx INTEGER PRIMARY KEY,
            task TEXT,
            todo TEXT,
            note TEXT,
            date TEXT
        );"
    ))?;
    tx.execute(&format!("DELETE FROM {table};"), [])?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} (row_idx, task, todo, note, date)
             VALUES (?1, ?2, ?3, ?4, ?5);"
        ))?;
        for (idx, row) in rows.iter().enumerate() {
            let [task, todo, note, date] = row.cells();
            stmt.execute(params![idx as i64, task, todo, note, date])?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn log_open_result(result: &StoreResult<SqliteSheetStore>, mode: &str, started_at: Instant) {
    match result {
        Ok(store) => info!(
            "event=store_open module=store status=ok mode={} rows={} duration_ms={}",
            mode,
            store.rows.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=store_open module=store status=error mode={} duration_ms={} error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        ),
    }
}
