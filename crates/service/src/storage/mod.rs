//! Storage abstractions for the service layer
//!
//! `ChatStore` is the seam between business rules and state. Every
//! operation must look atomic to callers; `MemoryStore` is the
//! in-process implementation.

pub mod memory_store;

pub use memory_store::MemoryStore;

use models::{Message, User};
use uuid::Uuid;

use crate::errors::StoreError;

/// Exclusive owner of the user table and the message log.
pub trait ChatStore: Send + Sync {
    /// Insert a user keyed by id. Fails if the username is already present.
    fn add_user(&self, user: User) -> Result<(), StoreError>;
    fn get_user(&self, id: &Uuid) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    /// Append without validating sender or receiver.
    fn add_message(&self, message: Message);
    /// Messages where the user is sender or receiver, in insertion order.
    fn get_messages_for_user(&self, user_id: &Uuid) -> Vec<Message>;
    /// Case-insensitive substring search across all messages, in insertion order.
    fn search_messages(&self, keyword: &str) -> Vec<Message>;
    /// Remove every message owned by `user_id` whose content matches `keyword`.
    /// Returns whether at least one message was removed.
    fn delete_message(&self, user_id: &Uuid, keyword: &str) -> bool;
    /// All users, in no particular order.
    fn list_users(&self) -> Vec<User>;
}
