use std::sync::Arc;

use models::{Message, User};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::{ServiceError, StoreError};
use crate::storage::ChatStore;

/// Chat business service over an injected store.
///
/// Holds no state of its own; all reads and writes go through `S`.
pub struct ChatService<S: ChatStore> {
    store: Arc<S>,
}

impl<S: ChatStore> Clone for ChatService<S> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ChatStore> ChatService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Return the user named `username`, registering it first if needed.
    ///
    /// A concurrent registration of the same name resolves to whichever
    /// insert won, so every caller observes the same user.
    ///
    /// # Examples
    /// ```
    /// use service::chat::ChatService;
    /// use service::storage::MemoryStore;
    /// use std::sync::Arc;
    /// let svc = ChatService::new(Arc::new(MemoryStore::new()));
    /// let first = svc.register_or_login("alice").unwrap();
    /// let again = svc.register_or_login("alice").unwrap();
    /// assert_eq!(first.id, again.id);
    /// ```
    #[instrument(skip(self))]
    pub fn register_or_login(&self, username: &str) -> Result<User, ServiceError> {
        if let Some(existing) = self.store.get_user_by_username(username) {
            debug!(user_id = %existing.id, "user_logged_in");
            return Ok(existing);
        }

        let candidate = User::new(username);
        match self.store.add_user(candidate.clone()) {
            Ok(()) => {
                info!(user_id = %candidate.id, username = %candidate.username, "user_registered");
                Ok(candidate)
            }
            Err(StoreError::UsernameTaken(name)) => {
                debug!(username = %name, "lost registration race, re-fetching");
                self.store
                    .get_user_by_username(&name)
                    .ok_or(ServiceError::UsernameTaken(name))
            }
        }
    }

    /// Send `content` from `sender_id` to the user named `receiver_username`.
    ///
    /// The sender id is not checked against the user table.
    ///
    /// # Examples
    /// ```
    /// use service::chat::ChatService;
    /// use service::errors::ServiceError;
    /// use service::storage::MemoryStore;
    /// use std::sync::Arc;
    /// let svc = ChatService::new(Arc::new(MemoryStore::new()));
    /// let alice = svc.register_or_login("alice").unwrap();
    /// svc.register_or_login("bob").unwrap();
    /// let sent = svc.send_message(alice.id, "bob", "hi").unwrap();
    /// assert_eq!(sent.content, "hi");
    /// let err = svc.send_message(alice.id, "ghost", "x").unwrap_err();
    /// assert!(matches!(err, ServiceError::ReceiverNotFound(_)));
    /// ```
    #[instrument(skip(self, content), fields(sender_id = %sender_id))]
    pub fn send_message(&self, sender_id: Uuid, receiver_username: &str, content: &str) -> Result<Message, ServiceError> {
        let receiver = self
            .store
            .get_user_by_username(receiver_username)
            .ok_or_else(|| ServiceError::ReceiverNotFound(receiver_username.to_string()))?;

        let message = Message::new(sender_id, receiver.id, content);
        self.store.add_message(message.clone());
        info!(message_id = %message.id, receiver_id = %receiver.id, "message_sent");
        Ok(message)
    }

    /// Messages sent or received by `user_id`, oldest first.
    pub fn get_messages(&self, user_id: Uuid) -> Vec<Message> {
        self.store.get_messages_for_user(&user_id)
    }

    /// Search every stored message, not only the caller's.
    pub fn search_messages(&self, keyword: &str) -> Vec<Message> {
        self.store.search_messages(keyword)
    }

    #[instrument(skip(self))]
    pub fn delete_message(&self, user_id: Uuid, keyword: &str) -> bool {
        let removed = self.store.delete_message(&user_id, keyword);
        info!(removed, "delete_by_keyword");
        removed
    }

    pub fn list_users(&self) -> Vec<User> { self.store.list_users() }

    pub fn get_user(&self, id: Uuid) -> Option<User> { self.store.get_user(&id) }
}
