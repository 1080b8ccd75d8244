//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose
//! level comes from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: startup, shutdown and final size per resource type
//! - **Store operations**: Create, Import, Get, Update, Delete, Action, Query
//! - **Client calls**: one span per call (`#[instrument]`)
//! - **HTTP requests**: one span per request from `tower-http`'s `TraceLayer`
//! - **Assembly**: counts of posts, terms, comments and errors per response
//!
//! Store log lines carry `entity_type` instead of a module path, which is why
//! targets are hidden.
//!
//! ```bash
//! RUST_LOG=info cargo run                  # lifecycle and per-response counts
//! RUST_LOG=debug cargo run                 # payloads, filters, lookups
//! RUST_LOG=simple_graph_api=debug,tower_http=info cargo run
//! ```
//!
//! With `RUST_LOG=debug` a `/posts` request with an attached term reads like:
//!
//! ```text
//! DEBUG Get entity_type="Post" id=1 found=true
//! DEBUG Resolved post post_id=1 fields=3
//! DEBUG Get entity_type="Term" id=4 found=true
//!  INFO Assembled response posts=1 terms=1 comments=0 errors=0
//! ```

/// Installs the global subscriber. Call once, early in `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
