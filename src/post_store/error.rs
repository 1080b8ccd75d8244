//! Error types for the post store.

use crate::model::TermId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(String),

    /// A term referenced by the post does not exist.
    #[error("Term {0} does not exist")]
    UnknownTerm(TermId),

    #[error("Post type must not be empty")]
    EmptyPostType,

    #[error("Metadata key must not be empty")]
    EmptyMetaKey,

    /// The term store could not be consulted.
    #[error("Term lookup failed: {0}")]
    TermLookup(String),

    #[error("Post store error: {0}")]
    StoreError(String),
}

impl From<String> for PostError {
    fn from(msg: String) -> Self {
        PostError::StoreError(msg)
    }
}
