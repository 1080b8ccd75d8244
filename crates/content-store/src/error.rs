//! # Store Errors
//!
//! Errors raised by the store plumbing itself. Resource-specific failures travel
//! inside [`StoreError::EntityError`] so callers can still downcast them.

/// Errors that can occur while talking to a [`StoreActor`](crate::StoreActor).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Resource already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
