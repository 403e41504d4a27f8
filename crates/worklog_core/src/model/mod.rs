//! Work log domain model.
//!
//! # Responsibility
//! - Define the fixed four-column sheet layout and its row shape.
//! - Classify incoming content into exactly one destination column.
//! - Own the day-key text format used for same-day row matching.
//!
//! # Invariants
//! - Column order is always Task, Todo, Note, Date.
//! - Row 0 of every sheet is the header row.

pub mod day;
pub mod entry;
pub mod sheet;
