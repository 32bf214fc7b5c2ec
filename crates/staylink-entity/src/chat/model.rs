//! Chat message model with discriminated authorship.
//!
//! System-authored messages are the append-only audit log of collaboration
//! state changes: every negotiation transition writes one. Authorship is a
//! first-class variant rather than a nullable sender column, so "no sender"
//! cannot be confused with a missing join.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "lowercase")]
pub enum MessageAuthor {
    /// Authored by a participant.
    User {
        /// The sending user's ID.
        sender_id: Uuid,
    },
    /// Authored by the platform when a collaboration changes state.
    System,
}

impl MessageAuthor {
    /// The sender column value for persistence (None for system messages).
    pub fn sender_id(&self) -> Option<Uuid> {
        match self {
            Self::User { sender_id } => Some(*sender_id),
            Self::System => None,
        }
    }

    /// The `message_type` column value for persistence.
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::System => "system",
        }
    }

    /// Reconstruct authorship from the persisted columns.
    ///
    /// A `user` row with a null sender is corrupt; it is surfaced as a
    /// system message rather than a panic.
    pub fn from_columns(message_type: &str, sender_id: Option<Uuid>) -> Self {
        match (message_type, sender_id) {
            ("user", Some(sender_id)) => Self::User { sender_id },
            _ => Self::System,
        }
    }
}

/// A message in a collaboration's chat thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// The collaboration thread this message belongs to.
    pub collaboration_id: Uuid,
    /// Who wrote the message.
    #[serde(flatten)]
    pub author: MessageAuthor,
    /// Message body.
    pub content: String,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Whether this is a system-authored audit message.
    pub fn is_system(&self) -> bool {
        matches!(self.author, MessageAuthor::System)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_columns_round_trip() {
        let id = Uuid::new_v4();
        let author = MessageAuthor::User { sender_id: id };
        assert_eq!(author.sender_id(), Some(id));
        assert_eq!(author.message_type(), "user");
        assert_eq!(
            MessageAuthor::from_columns("user", Some(id)),
            author
        );
        assert_eq!(MessageAuthor::System.sender_id(), None);
        assert_eq!(
            MessageAuthor::from_columns("system", None),
            MessageAuthor::System
        );
    }

    #[test]
    fn test_corrupt_user_row_degrades_to_system() {
        assert_eq!(
            MessageAuthor::from_columns("user", None),
            MessageAuthor::System
        );
    }
}
