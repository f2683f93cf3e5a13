//! Chat module: user registration and direct messaging on top of a
//! [`ChatStore`](crate::storage::ChatStore).

pub mod service;

pub use service::ChatService;
