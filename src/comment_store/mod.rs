//! Comment store: comments, their moderation state and metadata.
//!
//! Runs with a [`PostClient`](crate::clients::PostClient) context; a comment can
//! only be created on an existing post.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CommentClient;
use crate::model::Comment;
use content_store::StoreActor;

/// Creates a new comment store actor and its client.
pub fn new() -> (StoreActor<Comment>, CommentClient) {
    let (actor, store_client) = StoreActor::new(32);
    (actor, CommentClient::new(store_client))
}
