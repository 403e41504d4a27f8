//! Chat-message intake.
//!
//! # Responsibility
//! - Decide whether a message belongs in the work log (`work` topic tag).
//! - Resolve message content into plain text before it reaches the core.
//!
//! # Invariants
//! - Only the exact tag `work` qualifies.
//! - Empty resolved content is never synced.

use serde_json::Value;

const WORK_TAG: &str = "work";
const TEXT_FIELD: &str = "txt";

/// Whether a topic with `tags` feeds the work log.
pub fn is_work_topic<S: AsRef<str>>(tags: &[S]) -> bool {
    tags.iter().any(|tag| tag.as_ref() == WORK_TAG)
}

/// Whether a message tagged with `tags` should reach the work log.
///
/// With `require_tag` unset, an untagged message is always synced; any tags
/// that are given still have to include `work`.
pub fn should_sync<S: AsRef<str>>(tags: &[S], require_tag: bool) -> bool {
    if tags.is_empty() && !require_tag {
        return true;
    }
    is_work_topic(tags)
}

/// Resolves chat content into the text to sync.
///
/// - A JSON string is used as is.
/// - An object with a `txt` field uses that field's text.
/// - Anything else falls back to its JSON rendering.
///
/// Returns `None` when the resolved text is empty.
pub fn resolve_content(content: &Value) -> Option<String> {
    let text = match content {
        Value::String(text) => text.clone(),
        Value::Object(fields) => match fields.get(TEXT_FIELD) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => content.to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
