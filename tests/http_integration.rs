use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use simple_graph_api::api::build_router;
use simple_graph_api::graph::{self, DefaultHooks, GraphSettings};
use simple_graph_api::lifecycle::{seed, ContentSystem, Fixture};
use std::sync::Arc;
use tower::ServiceExt;

const FIXTURE: &str = include_str!("../fixtures/sample.json");

async fn app() -> Router {
    let system = ContentSystem::new();
    seed(&system, Fixture::from_json(FIXTURE).unwrap())
        .await
        .unwrap();
    let assembler = graph::assembler(
        &system,
        Arc::new(GraphSettings::default()),
        Arc::new(DefaultHooks),
    );
    build_router(assembler, "/graph/v1")
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_posts_by_path_and_query_string() {
    let (status, body) = get(app().await, "/graph/v1/posts/1,2?fields=id,slug").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "posts": [{ "id": 1, "slug": "hello-welcome" }],
            "errors": ["Post with ID 2 is not published"]
        })
    );

    // Native list syntax and the trailing-slash route give the same answer.
    let (status, list_body) = get(
        app().await,
        "/graph/v1/posts/?ids%5B%5D=1&ids%5B%5D=2&fields%5B%5D=id&fields%5B%5D=slug",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list_body, body);
}

#[tokio::test]
async fn test_terminal_errors_render_envelopes() {
    let (status, body) = get(app().await, "/graph/v1/terms?fields=id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "code": "graphql_no_term_ids",
            "message": "No valid term ids specified",
            "status": 404
        })
    );

    let (status, body) = get(app().await, "/graph/v1/comments/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "graphql_no_comment_fields");

    let (status, body) = get(app().await, "/graph/v1/any/?post_fields=id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "graphql_no_post_ids");
}

#[tokio::test]
async fn test_legacy_post_route() {
    let (status, body) = get(app().await, "/graph/v1/post/1?fields=id,password,subtitle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "password": null, "subtitle": "A first post" }));

    let (status, body) = get(app().await, "/graph/v1/post/2?fields=id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "code": "graphql_access_not_permitted",
            "message": "Sorry, you don't have permission to view post 2",
            "status": 404
        })
    );

    let (status, body) = get(app().await, "/graph/v1/post/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "graphql_no_fields");
}

#[tokio::test]
async fn test_any_route_and_rendered_fields() {
    let (status, body) = get(
        app().await,
        "/graph/v1/any?posts=1&post_fields=content&comments=7&comment_fields=author",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "posts": [{
                "content": {
                    "raw": "First paragraph.\n\nSecond paragraph.",
                    "rendered": "<p>First paragraph.</p>\n<p>Second paragraph.</p>\n"
                }
            }],
            "comments": [{ "author": "Ana" }]
        })
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = get(app().await, "/graph/v2/posts/1?fields=id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
