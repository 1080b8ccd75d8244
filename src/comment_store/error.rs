//! Error types for the comment store.

use crate::model::PostId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommentError {
    #[error("Comment not found: {0}")]
    NotFound(String),

    /// The post the comment belongs to does not exist.
    #[error("Post {0} does not exist")]
    UnknownPost(PostId),

    #[error("Metadata key must not be empty")]
    EmptyMetaKey,

    #[error("Post lookup failed: {0}")]
    PostLookup(String),

    #[error("Comment store error: {0}")]
    StoreError(String),
}

impl From<String> for CommentError {
    fn from(msg: String) -> Self {
        CommentError::StoreError(msg)
    }
}
