//! Router construction.

use super::handlers;
use crate::graph::ResponseAssembler;
use axum::routing::get;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builds the router with every endpoint mounted under `base_path`.
///
/// Collection routes answer with and without a trailing slash; IDs may come
/// from the path segment or the `ids` query parameter, the path winning.
pub fn build_router(assembler: ResponseAssembler, base_path: &str) -> Router {
    let routes = Router::new()
        .route("/post/:id", get(handlers::legacy_post))
        .route("/any", get(handlers::any))
        .route("/any/", get(handlers::any))
        .route("/posts", get(handlers::posts))
        .route("/posts/", get(handlers::posts))
        .route("/posts/:ids", get(handlers::posts_by_path))
        .route("/terms", get(handlers::terms))
        .route("/terms/", get(handlers::terms))
        .route("/terms/:ids", get(handlers::terms_by_path))
        .route("/comments", get(handlers::comments))
        .route("/comments/", get(handlers::comments))
        .route("/comments/:ids", get(handlers::comments_by_path));

    let base = base_path.trim_end_matches('/');
    let app = if base.is_empty() {
        routes
    } else {
        Router::new().nest(base, routes)
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(assembler)),
    )
}
