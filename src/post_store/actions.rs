//! Custom actions for the post store.

use crate::model::TermId;

/// Operations on a [`Post`](crate::model::Post) beyond plain CRUD.
#[derive(Debug, Clone)]
pub enum PostAction {
    /// Sets a metadata value, replacing any previous one.
    SetMeta { key: String, value: String },
    /// Removes a metadata key.
    DeleteMeta(String),
    /// Attaches terms to the post. Every term must exist; already attached
    /// terms are skipped.
    AttachTerms(Vec<TermId>),
    /// Detaches a term. Detaching a term that is not attached is a no-op.
    DetachTerm(TermId),
}

/// Results from [`PostAction`]s, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum PostActionResult {
    SetMeta(Option<String>),
    DeleteMeta(Option<String>),
    /// The post's term list after the attach.
    AttachTerms(Vec<TermId>),
    /// Whether the term was attached before.
    DetachTerm(bool),
}
