use thiserror::Error;

/// Failures raised by a [`ChatStore`](crate::storage::ChatStore).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("username already exists: {0}")]
    UsernameTaken(String),
}

/// Business errors surfaced to front ends.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("username already exists: {0}")]
    UsernameTaken(String),
    #[error("receiver not found: {0}")]
    ReceiverNotFound(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UsernameTaken(name) => Self::UsernameTaken(name),
        }
    }
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::UsernameTaken(_) => 2001,
            ServiceError::ReceiverNotFound(_) => 2002,
        }
    }
}
