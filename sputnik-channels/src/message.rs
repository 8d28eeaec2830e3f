//! Unified inbound message type produced by every channel adapter.

use serde::{Deserialize, Serialize};

/// One inbound text message, paired with its per-chat session identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Message ID (generated per update)
    pub id: String,
    /// Chat identifier; the session key
    pub chat_id: String,
    /// User identifier
    pub user_id: String,
    /// Sender's first name, when the transport provides one
    pub first_name: Option<String>,
    /// Raw message text
    pub text: String,
    /// Timestamp (Unix millis)
    pub timestamp: i64,
}

impl IncomingMessage {
    /// Build a message stamped with a fresh ID and the current time.
    pub fn now(
        chat_id: impl Into<String>,
        user_id: impl Into<String>,
        first_name: Option<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            user_id: user_id.into(),
            first_name,
            text: text.into(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_stamps_id_and_timestamp() {
        let a = IncomingMessage::now("42", "7", None, "Факт");
        let b = IncomingMessage::now("42", "7", None, "Факт");
        assert_ne!(a.id, b.id);
        assert!(a.timestamp > 0);
        assert_eq!(a.text, "Факт");
    }

    #[test]
    fn serialization_roundtrip() {
        let msg = IncomingMessage::now("42", "7", Some("Anna".into()), "Погода Москва");
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: IncomingMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.chat_id, "42");
        assert_eq!(parsed.first_name.as_deref(), Some("Anna"));
    }
}
