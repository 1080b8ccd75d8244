//! Post store: posts of every type, their term attachments and metadata.
//!
//! The store runs with a [`TermClient`] as its context so that every term a
//! post is attached to is checked for existence first.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PostClient;
use crate::model::Post;
use content_store::StoreActor;

/// Creates a new post store actor and its client.
pub fn new() -> (StoreActor<Post>, PostClient) {
    let (actor, store_client) = StoreActor::new(32);
    (actor, PostClient::new(store_client))
}
