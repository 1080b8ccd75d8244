//! Custom actions for the comment store.

use crate::model::CommentStatus;

#[derive(Debug, Clone)]
pub enum CommentAction {
    SetMeta { key: String, value: String },
    DeleteMeta(String),
    /// Moves the comment to a new moderation state.
    Moderate(CommentStatus),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentActionResult {
    SetMeta(Option<String>),
    DeleteMeta(Option<String>),
    /// The status before moderation.
    Moderate(CommentStatus),
}
