//! # Content Store
//!
//! An in-memory resource store built on the actor model. Each resource kind
//! gets its own [`StoreActor`], a Tokio task that owns an ordered map of
//! resources and serves requests sequentially; callers hold a cheap, cloneable
//! [`StoreClient`].
//!
//! ## Layers
//!
//! 1. **Resource** ([`StoredResource`]): the domain type, its payloads, its
//!    query filter and its lifecycle hooks.
//! 2. **Server** ([`StoreActor`]): message loop, ID allocation, ordered storage.
//! 3. **Interface** ([`StoreClient`], [`TypedClient`]): async request/response
//!    over channels, wrapped by resource-specific clients.
//!
//! ## Operations
//!
//! Every store supports `create`, `import` (explicit ID), `get`, `update`,
//! `delete`, resource-specific `perform_action`, and `query`, which returns a
//! snapshot of every resource accepted by [`StoredResource::matches`] in
//! ascending ID order.
//!
//! ## Context injection
//!
//! Hooks receive the `Context` passed to [`StoreActor::run`], not to
//! [`StoreActor::new`]. Stores can depend on each other's clients without
//! construction-order cycles: build all actors first, then start them with the
//! clients they need.
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers a real [`StoreClient`] from scripted
//! expectations, for tests of code that calls a store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::TypedClient;
pub use entity::StoredResource;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
