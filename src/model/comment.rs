//! Comments attached to posts.

use super::{resource_id, Meta, PostId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

resource_id!(
    /// Type-safe identifier for comments.
    CommentId
);

/// Moderation state of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Approved,
    #[default]
    Pending,
    Spam,
    Trash,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Approved => "approved",
            CommentStatus::Pending => "pending",
            CommentStatus::Spam => "spam",
            CommentStatus::Trash => "trash",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: String,
    pub author_email: String,
    pub author_url: String,
    pub author_ip: String,
    pub date: NaiveDateTime,
    pub content: String,
    pub status: CommentStatus,
    pub agent: String,
    /// Empty for regular comments; `pingback`, `trackback` or a custom type otherwise.
    pub comment_type: String,
    pub parent: u64,
    pub user_id: u64,
    pub meta: Meta,
}

impl Comment {
    pub fn new(id: CommentId, params: CommentCreate) -> Self {
        Self {
            id,
            post_id: params.post_id,
            author: params.author,
            author_email: params.author_email,
            author_url: params.author_url,
            author_ip: params.author_ip,
            date: params.date,
            content: params.content,
            status: params.status,
            agent: params.agent,
            comment_type: params.comment_type,
            parent: params.parent,
            user_id: params.user_id,
            meta: params.meta,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == CommentStatus::Approved
    }
}

/// Payload for creating a new comment. Also the shape of comments in seed fixtures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentCreate {
    pub post_id: PostId,
    pub author: String,
    pub author_email: String,
    pub author_url: String,
    pub author_ip: String,
    pub date: NaiveDateTime,
    pub content: String,
    pub status: CommentStatus,
    pub agent: String,
    pub comment_type: String,
    pub parent: u64,
    pub user_id: u64,
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentUpdate {
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub content: Option<String>,
}

/// Store-level predicate over comments.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub post_id: Option<PostId>,
    pub status: Option<CommentStatus>,
}

impl CommentFilter {
    /// Approved comments on `post_id`.
    pub fn approved_on(post_id: PostId) -> Self {
        Self {
            post_id: Some(post_id),
            status: Some(CommentStatus::Approved),
        }
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        self.post_id.map_or(true, |id| comment.post_id == id)
            && self.status.map_or(true, |status| comment.status == status)
    }
}
