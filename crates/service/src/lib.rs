//! Service layer for the chat application.
//! - `storage` owns all user and message state behind one lock.
//! - `chat` applies business rules (registration, receiver resolution).
//! - `errors` carries the error taxonomy shared by both.

pub mod errors;
pub mod storage;
pub mod chat;
