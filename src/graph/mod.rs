//! # Projection Core
//!
//! Turns requests of the form "these IDs, these fields" into trimmed-down JSON
//! objects.
//!
//! | Stage | Module |
//! |---|---|
//! | Request parsing, `default` expansion | [`request`] |
//! | Post query behind the `query` keyword | [`query`] |
//! | Field resolution and status gates | [`resolver`], [`attributes`] |
//! | Privacy filter | [`privacy`] |
//! | Aggregation and error collection | [`assembler`] |
//!
//! Behaviour that deployments customize lives in [`GraphSettings`] (computed
//! once at startup) and [`GraphHooks`] (injected at construction).

pub mod assembler;
pub mod attributes;
pub mod error;
pub mod field;
pub mod hooks;
pub mod privacy;
pub mod query;
pub mod request;
pub mod resolver;
pub mod settings;

pub use assembler::{AggregateResponse, ResponseAssembler};
pub use error::{GraphError, ResourceFailure, ResourceKind};
pub use field::{FieldMap, FieldValue};
pub use hooks::{DefaultHooks, GraphHooks};
pub use request::{FieldSpec, IdToken, RawParams};
pub use resolver::FieldResolver;
pub use settings::{GraphSettings, PRIVATE_KEY_PLACEHOLDER};

use crate::lifecycle::ContentSystem;
use std::sync::Arc;

/// Builds the assembler over the stores of `system`.
pub fn assembler(
    system: &ContentSystem,
    settings: Arc<GraphSettings>,
    hooks: Arc<dyn GraphHooks>,
) -> ResponseAssembler {
    let resolver = FieldResolver::new(
        system.post_client.clone(),
        system.term_client.clone(),
        system.comment_client.clone(),
        settings,
        hooks,
    );
    ResponseAssembler::new(resolver)
}
