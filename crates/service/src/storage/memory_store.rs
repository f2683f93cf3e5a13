use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use models::{Message, User};
use tracing::debug;
use uuid::Uuid;

use super::ChatStore;
use crate::errors::StoreError;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    messages: Vec<Message>,
}

/// In-memory store guarding users and messages behind a single lock.
///
/// Message history is never evicted, so memory grows with every send.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    // Every mutation is a single insert/push/retain, so a panic while
    // holding the lock cannot leave the tables half-written.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatStore for MemoryStore {
    fn add_user(&self, user: User) -> Result<(), StoreError> {
        let mut tables = self.write();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken(user.username));
        }
        tables.users.insert(user.id, user);
        Ok(())
    }

    fn get_user(&self, id: &Uuid) -> Option<User> {
        self.read().users.get(id).cloned()
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.read().users.values().find(|u| u.username == username).cloned()
    }

    fn add_message(&self, message: Message) {
        self.write().messages.push(message);
    }

    fn get_messages_for_user(&self, user_id: &Uuid) -> Vec<Message> {
        self.read().messages.iter().filter(|m| m.involves(user_id)).cloned().collect()
    }

    fn search_messages(&self, keyword: &str) -> Vec<Message> {
        self.read().messages.iter().filter(|m| m.matches_keyword(keyword)).cloned().collect()
    }

    fn delete_message(&self, user_id: &Uuid, keyword: &str) -> bool {
        let mut tables = self.write();
        let before = tables.messages.len();
        tables.messages.retain(|m| !(m.involves(user_id) && m.matches_keyword(keyword)));
        let removed = before - tables.messages.len();
        debug!(%user_id, removed, "messages_deleted");
        removed > 0
    }

    fn list_users(&self) -> Vec<User> {
        self.read().users.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(msgs: &[Message]) -> Vec<&str> {
        msgs.iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn add_user_rejects_duplicate_username() {
        let store = MemoryStore::new();
        let alice = User::new("alice");
        store.add_user(alice.clone()).unwrap();

        let err = store.add_user(User::new("alice")).unwrap_err();
        assert_eq!(err, StoreError::UsernameTaken("alice".into()));
        assert_eq!(store.list_users(), vec![alice.clone()]);
        assert_eq!(store.get_user(&alice.id), Some(alice.clone()));
        assert_eq!(store.get_user_by_username("alice"), Some(alice));
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let store = MemoryStore::new();
        store.add_user(User::new("alice")).unwrap();
        store.add_user(User::new("Alice")).unwrap();
        assert_eq!(store.list_users().len(), 2);
        assert!(store.get_user_by_username("ALICE").is_none());
    }

    #[test]
    fn messages_for_user_keep_insertion_order() {
        let store = MemoryStore::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.add_message(Message::new(a, b, "one"));
        store.add_message(Message::new(b, c, "two"));
        store.add_message(Message::new(b, a, "three"));

        assert_eq!(contents(&store.get_messages_for_user(&a)), ["one", "three"]);
        assert_eq!(contents(&store.get_messages_for_user(&b)), ["one", "two", "three"]);
        assert_eq!(contents(&store.get_messages_for_user(&c)), ["two"]);
        assert!(store.get_messages_for_user(&Uuid::new_v4()).is_empty());
    }

    #[test]
    fn search_is_global_and_case_insensitive() {
        let store = MemoryStore::new();
        let (a, b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.add_message(Message::new(a, b, "say hello world"));
        store.add_message(Message::new(c, d, "HELLO again"));
        store.add_message(Message::new(a, b, "bye"));

        assert_eq!(contents(&store.search_messages("HELLO")), ["say hello world", "HELLO again"]);
        assert!(store.search_messages("nothing").is_empty());
    }

    #[test]
    fn delete_only_touches_owned_matching_messages() {
        let store = MemoryStore::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.add_message(Message::new(a, b, "hello there"));
        store.add_message(Message::new(c, b, "hello from c"));
        store.add_message(Message::new(a, b, "goodbye"));
        store.add_message(Message::new(b, a, "HELLO back"));

        assert!(store.delete_message(&a, "hello"));
        assert_eq!(contents(&store.search_messages("")), ["hello from c", "goodbye"]);
        assert!(!store.delete_message(&a, "hello"));
    }
}
