//! Sheet layout and row model.
//!
//! # Responsibility
//! - Define the four fixed columns and their storage order.
//! - Provide the in-memory row shape shared by store, router and service.
//!
//! # Invariants
//! - A row always carries exactly `COLUMN_COUNT` optional cells.
//! - `HEADER_ROW` (index 0) is never treated as a data row.

use std::fmt::{Display, Formatter};

/// Number of columns in every sheet.
pub const COLUMN_COUNT: usize = 4;

/// Index of the header row.
pub const HEADER_ROW: usize = 0;

/// Index of the first data row. New day rows are always inserted here.
pub const FIRST_DATA_ROW: usize = 1;

/// Default header labels, in column order.
pub const DEFAULT_HEADER: [&str; COLUMN_COUNT] = ["Task", "Todo", "Note", "Date"];

/// One of the four fixed sheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Work done; fed by the `Ta:` prefix.
    Task,
    /// Follow-ups; fed by the `To:` prefix.
    Todo,
    /// Free-form remarks; fed by unprefixed content.
    Note,
    /// Day key written by `format_day`.
    Date,
}

impl Column {
    /// All columns in storage order.
    pub const ALL: [Column; COLUMN_COUNT] =
        [Column::Task, Column::Todo, Column::Note, Column::Date];

    /// Zero-based position of the column within a row.
    pub fn index(self) -> usize {
        match self {
            Self::Task => 0,
            Self::Todo => 1,
            Self::Note => 2,
            Self::Date => 3,
        }
    }

    /// Stable lowercase name, also used as the SQL column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Todo => "todo",
            Self::Note => "note",
            Self::Date => "date",
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sheet row: Task, Todo, Note and Date cells.
///
/// `None` means the cell was never set, which reads back as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    cells: [Option<String>; COLUMN_COUNT],
}

impl SheetRow {
    /// Creates a row with every cell unset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a row from raw cells in column order.
    pub fn from_cells(cells: [Option<String>; COLUMN_COUNT]) -> Self {
        Self { cells }
    }

    /// Creates a header row from labels in column order.
    pub fn header<S: AsRef<str>>(labels: &[S; COLUMN_COUNT]) -> Self {
        let mut row = Self::empty();
        for column in Column::ALL {
            row.set(column, labels[column.index()].as_ref());
        }
        row
    }

    /// Returns the cell text, or `""` when unset.
    pub fn get(&self, column: Column) -> &str {
        self.cells[column.index()].as_deref().unwrap_or("")
    }

    /// Returns the raw cell, distinguishing unset from empty.
    pub fn raw(&self, column: Column) -> Option<&str> {
        self.cells[column.index()].as_deref()
    }

    /// Overwrites one cell.
    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.cells[column.index()] = Some(value.into());
    }

    /// Returns all raw cells in column order.
    pub fn cells(&self) -> &[Option<String>; COLUMN_COUNT] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, SheetRow, DEFAULT_HEADER};

    #[test]
    fn column_indices_follow_storage_order() {
        let indices: Vec<usize> = Column::ALL.iter().map(|column| column.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unset_cell_reads_as_empty_string() {
        let row = SheetRow::empty();
        assert_eq!(row.get(Column::Note), "");
        assert_eq!(row.raw(Column::Note), None);
    }

    #[test]
    fn header_row_carries_labels_in_order() {
        let row = SheetRow::header(&DEFAULT_HEADER);
        assert_eq!(row.get(Column::Task), "Task");
        assert_eq!(row.get(Column::Date), "Date");
    }
}
