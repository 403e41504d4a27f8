//! Content classification.
//!
//! # Responsibility
//! - Map incoming content onto exactly one destination column.
//! - Produce the cleaned payload written into that column.
//!
//! # Invariants
//! - Prefix matching is case-sensitive and covers exactly three bytes,
//!   colon included.
//! - Task/Todo payloads are trimmed; Note payloads are kept verbatim.

use super::sheet::Column;

const TASK_PREFIX: &str = "Ta:";
const TODO_PREFIX: &str = "To:";

/// Classified content item with its cleaned payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Task(String),
    Todo(String),
    Note(String),
}

impl Entry {
    /// Classifies raw content by its leading prefix tag.
    ///
    /// Anything that does not start with `Ta:` or `To:` exactly, including
    /// `ta:` or `Ta :`, is a note.
    pub fn classify(content: &str) -> Self {
        if let Some(rest) = content.strip_prefix(TASK_PREFIX) {
            Self::Task(rest.trim().to_string())
        } else if let Some(rest) = content.strip_prefix(TODO_PREFIX) {
            Self::Todo(rest.trim().to_string())
        } else {
            Self::Note(content.to_string())
        }
    }

    /// Destination column.
    pub fn column(&self) -> Column {
        match self {
            Self::Task(_) => Column::Task,
            Self::Todo(_) => Column::Todo,
            Self::Note(_) => Column::Note,
        }
    }

    /// Cleaned payload.
    pub fn into_payload(self) -> String {
        match self {
            Self::Task(payload) | Self::Todo(payload) | Self::Note(payload) => payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;
    use crate::model::sheet::Column;

    #[test]
    fn task_prefix_is_stripped_and_trimmed() {
        let entry = Entry::classify("Ta:   fix the heater  ");
        assert_eq!(entry, Entry::Task("fix the heater".to_string()));
        assert_eq!(entry.column(), Column::Task);
    }

    #[test]
    fn todo_prefix_is_stripped_and_trimmed() {
        let entry = Entry::classify("To: read the docs");
        assert_eq!(entry, Entry::Todo("read the docs".to_string()));
        assert_eq!(entry.column(), Column::Todo);
    }

    #[test]
    fn near_miss_prefixes_fall_through_to_note() {
        for content in ["ta: x", "Ta :x", "TA: x", "To x", " Ta: x"] {
            let entry = Entry::classify(content);
            assert_eq!(entry, Entry::Note(content.to_string()), "{content}");
        }
    }

    #[test]
    fn note_payload_is_not_trimmed() {
        let entry = Entry::classify("  spaced note \n");
        assert_eq!(entry.into_payload(), "  spaced note \n");
    }

    #[test]
    fn bare_prefix_yields_empty_payload() {
        assert_eq!(Entry::classify("Ta:"), Entry::Task(String::new()));
    }

    #[test]
    fn multibyte_content_after_prefix_is_preserved() {
        let entry = Entry::classify("Ta: 热水器又坏");
        assert_eq!(entry.into_payload(), "热水器又坏");
    }
}
