//! Term store: taxonomy terms and their metadata.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TermClient;
use crate::model::Term;
use content_store::StoreActor;

/// Creates a new term store actor and its client.
pub fn new() -> (StoreActor<Term>, TermClient) {
    let (actor, store_client) = StoreActor::new(32);
    (actor, TermClient::new(store_client))
}
