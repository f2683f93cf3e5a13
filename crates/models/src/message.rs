use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A direct text message between two users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a message stamped with a fresh id and the current wall-clock time.
    pub fn new(sender_id: Uuid, receiver_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether `user_id` is the sender or the receiver.
    pub fn involves(&self, user_id: &Uuid) -> bool {
        self.sender_id == *user_id || self.receiver_id == *user_id
    }

    /// Case-insensitive substring test against the content.
    ///
    /// An empty keyword matches every message.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.content.to_lowercase().contains(&keyword.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involves_sender_and_receiver_only() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let m = Message::new(a, b, "hi");
        assert!(m.involves(&a));
        assert!(m.involves(&b));
        assert!(!m.involves(&c));
    }

    #[test]
    fn keyword_match_ignores_case() {
        let m = Message::new(Uuid::new_v4(), Uuid::new_v4(), "say Hello world");
        assert!(m.matches_keyword("HELLO"));
        assert!(m.matches_keyword("lo wo"));
        assert!(m.matches_keyword(""));
        assert!(!m.matches_keyword("goodbye"));
    }

    #[test]
    fn json_shape_uses_snake_case_fields() {
        let m = Message::new(Uuid::new_v4(), Uuid::new_v4(), "x");
        let v = serde_json::to_value(&m).unwrap();
        for key in ["id", "sender_id", "receiver_id", "content", "timestamp"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
    }
}
