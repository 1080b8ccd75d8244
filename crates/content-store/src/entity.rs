//! # StoredResource Trait
//!
//! The contract every resource kind (post, term, comment, ...) implements to be
//! held by a [`StoreActor`](crate::StoreActor). Associated types pin down the ID,
//! the create/update payloads, custom actions, the query filter and the error
//! type, so a post payload can never reach the term store.
//!
//! Lifecycle hooks receive the actor's `Context`, which is injected when the
//! actor starts running rather than when it is built. A store can therefore hold
//! clients of other stores (comments validating their post, posts validating
//! their terms) without construction-order cycles.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource must implement to be managed by a `StoreActor`.
#[async_trait]
pub trait StoredResource: Clone + Debug + Send + Sync + 'static {
    /// Numeric identifier. Stores hand out IDs from a `u64` counter and keep
    /// resources ordered by ID.
    type Id: Ord + Hash + Copy + Send + Sync + Display + Debug + From<u64> + Into<u64>;

    /// Payload used to build a new resource.
    type Create: Send + Sync + Debug;

    /// Payload used to modify an existing resource.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (metadata writes, moderation, ...).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Predicate description used by `Query` requests.
    type Filter: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` for none.
    type Context: Send + Sync;

    /// Error type for this resource.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the resource from its ID and creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this resource is selected by `filter`. Defaults to matching everything.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    /// Called after construction and before the resource is stored.
    /// An error here rejects the create (or import).
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called immediately before the resource is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
