//! Domain entities shared by the store, the service layer and front ends.

pub mod user;
pub mod message;

pub use message::Message;
pub use user::User;
