//! # System Lifecycle
//!
//! Starts the three store actors, wires them together and shuts them down.
//!
//! Stores depend on each other only through their run-time context:
//!
//! ```text
//! comments --(PostClient)--> posts --(TermClient)--> terms
//! ```
//!
//! The graph is acyclic, so dropping the clients handed out by
//! [`ContentSystem`] is enough to stop every actor: the comment store stops
//! first, which drops the last post client, which stops the post store, and so
//! on down to the terms.
//!
//! [`seed`] imports a JSON fixture into a running system and [`setup_tracing`]
//! installs the log subscriber.

pub mod content_system;
pub mod seed;
pub mod tracing;

pub use content_system::*;
pub use seed::*;
pub use tracing::*;
