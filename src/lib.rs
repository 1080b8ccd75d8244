//! # Simple Graph API
//!
//! A small read API over posts, taxonomy terms and comments. Clients name the
//! resources they want by ID and the fields they want by name, and get back
//! trimmed-down JSON objects:
//!
//! ```text
//! GET /graph/v1/posts/3,5?fields=default,terms&term_fields=name
//! {"posts":[{"id":3,"title":{"raw":"…","rendered":"…"},"terms":"4,9"}, …],
//!  "terms":[{"name":"News"},{"name":"Rust"}],
//!  "errors":["Post with ID 5 is not published"]}
//! ```
//!
//! ## Architecture Notes
//!
//! ### 1. Stores are actors
//! Posts, terms and comments each live in a [`content_store::StoreActor`] running
//! on its own Tokio task. The actor owns its map outright and handles one
//! request at a time, so no resource state is ever locked. Cross-store checks
//! (a post's terms exist, a comment's post exists) run inside the store hooks,
//! with the other store's client injected as context when the actor starts.
//!
//! ### 2. Partial success
//! Batch endpoints never fail because one item did. Per-item failures become
//! strings in the response's `errors` array; only request-level problems (no
//! IDs, no fields) abort with a `{code, message, status}` envelope.
//!
//! ### 3. No global registries
//! Exposure rules are computed once into [`graph::GraphSettings`] and behaviour
//! overrides are injected as a [`graph::GraphHooks`] implementation.
//!
//! ## Module Tour
//!
//! - [`model`]: posts, terms, comments, their payloads and store filters.
//! - [`post_store`], [`term_store`], [`comment_store`]: store hooks, actions, errors.
//! - [`clients`]: typed clients over the stores.
//! - [`lifecycle`]: [`ContentSystem`](lifecycle::ContentSystem), fixture seeding, tracing.
//! - [`graph`]: parsing, resolution, privacy and assembly.
//! - [`api`]: the axum router.
//! - [`config`]: TOML configuration.
//!
//! ## Running
//!
//! ```bash
//! GRAPH_API_CONFIG=config/graph-api.toml RUST_LOG=info cargo run
//! ```

pub mod api;
pub mod clients;
pub mod comment_store;
pub mod config;
pub mod graph;
pub mod lifecycle;
pub mod model;
pub mod post_store;
pub mod term_store;
