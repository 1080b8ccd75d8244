//! Error types for the term store.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TermError {
    #[error("Term not found: {0}")]
    NotFound(String),

    #[error("Term name must not be empty")]
    EmptyName,

    #[error("Term taxonomy must not be empty")]
    EmptyTaxonomy,

    #[error("Metadata key must not be empty")]
    EmptyMetaKey,

    /// The store actor could not be reached or answered with a plumbing error.
    #[error("Term store error: {0}")]
    StoreError(String),
}

impl From<String> for TermError {
    fn from(msg: String) -> Self {
        TermError::StoreError(msg)
    }
}
