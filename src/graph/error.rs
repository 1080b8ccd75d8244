//! Errors of the projection layer.
//!
//! Two shapes coexist on the wire. [`GraphError`] aborts the whole request and
//! is rendered as a structured `{code, message, status}` envelope, while
//! [`ResourceFailure`] only fails one item of a batch and is rendered as a
//! plain string in the response's `errors` array.

use thiserror::Error;

/// A request-level failure. No partial result is produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("No valid {} ids specified", .0.as_str())]
    NoIdsSpecified(ResourceKind),

    #[error("No valid {} fields specified", .0.as_str())]
    NoFieldsSpecified(ResourceKind),

    /// Single-post endpoint: the post is missing or of a type it does not serve.
    #[error("No post found with the specified ID.")]
    PostNotFound,

    /// Single-post endpoint: the post exists but is not published.
    #[error("Sorry, you don't have permission to view post {0}")]
    AccessNotPermitted(u64),

    /// Single-post endpoint: the `fields` parameter was empty.
    #[error("No fields passed in.")]
    NoFields,

    /// Single-post endpoint: the post store could not be reached.
    #[error("Unable to load post {0}")]
    StoreUnavailable(u64),
}

impl GraphError {
    /// Stable machine-readable code, used as the envelope's `code`.
    pub fn code(&self) -> String {
        match self {
            GraphError::NoIdsSpecified(kind) => format!("graphql_no_{}_ids", kind.as_str()),
            GraphError::NoFieldsSpecified(kind) => format!("graphql_no_{}_fields", kind.as_str()),
            GraphError::PostNotFound => "graphql_no_post_found".to_string(),
            GraphError::AccessNotPermitted(_) => "graphql_access_not_permitted".to_string(),
            GraphError::NoFields => "graphql_no_fields".to_string(),
            GraphError::StoreUnavailable(_) => "graphql_store_unavailable".to_string(),
        }
    }

    /// HTTP status the envelope is delivered with.
    pub fn status(&self) -> u16 {
        match self {
            GraphError::StoreUnavailable(_) => 503,
            _ => 404,
        }
    }
}

/// One item of a batch could not be resolved.
///
/// `Display` is the exact message placed in the response's `errors` array.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceFailure {
    #[error("No post with ID {0} found")]
    PostNotFound(String),

    #[error("Post with ID {0} is not published")]
    PostNotPublished(String),

    /// Password-protected, or of a post type that is not exposed.
    #[error("Permission denied for post with ID {0}")]
    PostPermissionDenied(String),

    #[error("No term with ID {0} found")]
    TermNotFound(String),

    #[error("No approved comment with ID {0} found")]
    CommentNotFound(String),

    #[error("Comment with ID {0} has not been approved")]
    CommentNotApproved(String),

    #[error("Disallowed comment type for comment with ID {0}")]
    CommentTypeDisallowed(String),

    #[error("Unable to load {} with ID {id}", .kind.as_str())]
    StoreUnavailable { kind: ResourceKind, id: String },
}

impl ResourceFailure {
    /// The failure reported for an ID token that does not name any resource.
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        let id = id.into();
        match kind {
            ResourceKind::Post => ResourceFailure::PostNotFound(id),
            ResourceKind::Term => ResourceFailure::TermNotFound(id),
            ResourceKind::Comment => ResourceFailure::CommentNotFound(id),
        }
    }
}

/// The three resource kinds the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Post,
    Term,
    Comment,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Post => "post",
            ResourceKind::Term => "term",
            ResourceKind::Comment => "comment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_codes_are_per_kind() {
        assert_eq!(
            GraphError::NoIdsSpecified(ResourceKind::Post).code(),
            "graphql_no_post_ids"
        );
        assert_eq!(
            GraphError::NoFieldsSpecified(ResourceKind::Comment).code(),
            "graphql_no_comment_fields"
        );
        assert_eq!(
            GraphError::NoIdsSpecified(ResourceKind::Term).to_string(),
            "No valid term ids specified"
        );
        assert_eq!(GraphError::AccessNotPermitted(7).status(), 404);
    }

    #[test]
    fn failure_messages_carry_the_offending_id() {
        assert_eq!(
            ResourceFailure::PostNotPublished("12".into()).to_string(),
            "Post with ID 12 is not published"
        );
        assert_eq!(
            ResourceFailure::not_found(ResourceKind::Comment, "abc").to_string(),
            "No approved comment with ID abc found"
        );
        assert_eq!(
            ResourceFailure::StoreUnavailable {
                kind: ResourceKind::Term,
                id: "4".into()
            }
            .to_string(),
            "Unable to load term with ID 4"
        );
    }
}
