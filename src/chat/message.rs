use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single chat message.
///
/// Messages are immutable once built and travel as the JSON payload of
/// channel events.
///
/// # Example
///
/// ```rust
/// use popchat::chat::ChatMessage;
///
/// let msg = ChatMessage::new("alice", "hello");
/// assert_eq!(msg.text, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Builds a message stamped with a fresh id and the current time.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: author.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}
