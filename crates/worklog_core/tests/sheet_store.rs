use rusqlite::Connection;
use worklog_core::{Column, SheetRow, SqliteSheetStore, StoreError, TabularStore, DEFAULT_HEADER};

#[test]
fn open_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/work.sqlite3");

    let mut store = open(&path);
    assert_eq!(store.rows().len(), 1);
    store.save().unwrap();

    assert!(path.exists());
    assert_eq!(store.path(), Some(path.as_path()));
}

#[test]
fn open_reports_io_error_when_parent_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();

    let err = SqliteSheetStore::open(
        blocker.join("work.sqlite3"),
        "Sheet1",
        SheetRow::header(&DEFAULT_HEADER),
    )
    .err()
    .unwrap();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn open_reports_io_error_when_path_is_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("adir");
    std::fs::create_dir(&target).unwrap();

    let err = SqliteSheetStore::open(&target, "Sheet1", SheetRow::header(&DEFAULT_HEADER))
        .err()
        .unwrap();
    match err {
        StoreError::Io { path, .. } => assert_eq!(path, target),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sheet_name_differing_only_in_case_reuses_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work.sqlite3");

    let mut store = open(&path);
    store.insert_row(1).unwrap();
    store.set_cell(1, Column::Task, "precious").unwrap();
    store.save().unwrap();
    drop(store);

    let mut lowercase =
        SqliteSheetStore::open(&path, "sheet1", SheetRow::header(&DEFAULT_HEADER)).unwrap();
    assert_eq!(lowercase.rows().len(), 2);
    assert_eq!(lowercase.cell(1, Column::Task), "precious");
    lowercase.save().unwrap();
    drop(lowercase);

    let reopened = open(&path);
    assert_eq!(reopened.rows().len(), 2);
    assert_eq!(reopened.cell(1, Column::Task), "precious");
}

#[test]
fn saved_rows_round_trip_through_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work.sqlite3");

    let mut store = open(&path);
    store.insert_row(1).unwrap();
    store.set_cell(1, Column::Date, "5/07/2024").unwrap();
    store.set_cell(1, Column::Note, "line one\nline two").unwrap();
    store.save().unwrap();
    drop(store);

    let reopened = open(&path);
    assert_eq!(reopened.rows().len(), 2);
    assert_eq!(reopened.cell(1, Column::Note), "line one\nline two");
    assert_eq!(reopened.cell(1, Column::Task), "");
    assert_eq!(reopened.rows()[1].raw(Column::Task), None);
}

#[test]
fn existing_database_without_sheet_gets_header_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE other (id INTEGER);").unwrap();
    drop(conn);

    let mut store = open(&path);
    assert_eq!(store.rows(), &[SheetRow::header(&DEFAULT_HEADER)]);
    store.save().unwrap();
    drop(store);

    let conn = Connection::open(&path).unwrap();
    let header: String = conn
        .query_row("SELECT task FROM \"Sheet1\" WHERE row_idx = 0;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(header, "Task");
    let others: i64 = conn
        .query_row("SELECT COUNT(*) FROM other;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(others, 0);
}

#[test]
fn non_database_file_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work.sqlite3");
    std::fs::write(&path, vec![b'x'; 4096]).unwrap();

    let err = SqliteSheetStore::open(&path, "Sheet1", SheetRow::header(&DEFAULT_HEADER))
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::Format(_)), "unexpected error: {err}");
}

#[test]
fn sheet_with_foreign_columns_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE \"Sheet1\" (a TEXT, b TEXT);")
        .unwrap();
    drop(conn);

    let err = SqliteSheetStore::open(&path, "Sheet1", SheetRow::header(&DEFAULT_HEADER))
        .err()
        .unwrap();
    match err {
        StoreError::Format(message) => assert!(message.contains("Sheet1")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_save_keeps_previously_persisted_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work.sqlite3");

    let mut store = open(&path);
    store.insert_row(1).unwrap();
    store.set_cell(1, Column::Task, "persisted").unwrap();
    store.save().unwrap();
    drop(store);

    let mut store = open(&path);
    store.insert_row(1).unwrap();
    store.set_cell(1, Column::Task, "lost").unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_lost BEFORE INSERT ON \"Sheet1\"
         WHEN NEW.task = 'lost'
         BEGIN
             SELECT RAISE(ABORT, 'blocked');
         END;",
    )
    .unwrap();
    drop(conn);

    assert!(store.save().is_err());
    drop(store);

    let reopened = open(&path);
    assert_eq!(reopened.rows().len(), 2);
    assert_eq!(reopened.cell(1, Column::Task), "persisted");
}

#[test]
fn sheets_in_one_file_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work.sqlite3");

    let mut first = open(&path);
    first.insert_row(1).unwrap();
    first.set_cell(1, Column::Note, "first").unwrap();
    first.save().unwrap();
    drop(first);

    let second = SqliteSheetStore::open(&path, "Sheet2", SheetRow::header(&DEFAULT_HEADER)).unwrap();
    assert_eq!(second.sheet(), "Sheet2");
    assert_eq!(second.rows().len(), 1);
}

fn open(path: &std::path::Path) -> SqliteSheetStore {
    SqliteSheetStore::open(path, "Sheet1", SheetRow::header(&DEFAULT_HEADER)).unwrap()
}
