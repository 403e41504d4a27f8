//! Daily routing decisions.
//!
//! # Responsibility
//! - Decide destination column, target row and cleaned payload for content.
//! - Stay pure: no store access, no clock access.
//!
//! # Invariants
//! - The header row is never a routing target.
//! - New day rows are always placed directly below the header.

pub mod daily;
