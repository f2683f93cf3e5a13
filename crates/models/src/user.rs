use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered chat participant. Created once, never updated or removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

impl User {
    /// Build a user with a freshly generated id.
    pub fn new(username: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), username: username.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_users_get_distinct_ids() {
        let a = User::new("alice");
        let b = User::new("alice");
        assert_eq!(a.username, "alice");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let u = User::new("bob");
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["username"], "bob");
        assert_eq!(v["id"], u.id.to_string());
    }
}
