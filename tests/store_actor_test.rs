use content_store::mock::MockStore;
use content_store::{StoreError, TypedClient};
use simple_graph_api::clients::{PostClient, TermClient};
use simple_graph_api::comment_store::CommentError;
use simple_graph_api::model::{
    CommentCreate, CommentStatus, Post, PostCreate, PostFilter, PostId, Term, TermCreate, TermId,
};
use simple_graph_api::post_store::PostError;

fn term(id: u64, name: &str) -> Term {
    Term::new(
        TermId(id),
        TermCreate {
            name: name.to_string(),
            ..Default::default()
        },
    )
}

/// Real post store with a mocked term store.
/// Exercises `Post::on_create` term validation in isolation.
#[tokio::test]
async fn test_post_store_validates_terms_against_term_store() {
    let mut term_mock = MockStore::<Term>::new();
    // First create: both terms exist. Second create: term 99 is missing.
    term_mock.expect_get(TermId(4)).return_ok(Some(term(4, "News")));
    term_mock.expect_get(TermId(9)).return_ok(Some(term(9, "Rust")));
    term_mock.expect_get(TermId(99)).return_ok(None);

    let term_client = TermClient::new(term_mock.client());
    let (post_actor, post_client) = simple_graph_api::post_store::new();
    let actor_handle = tokio::spawn(post_actor.run(term_client.clone()));

    let id = post_client
        .create_post(PostCreate {
            title: "Tagged".to_string(),
            term_ids: vec![TermId(4), TermId(9), TermId(4)],
            ..Default::default()
        })
        .await
        .expect("post with existing terms should be created");

    let post = post_client.get(id).await.unwrap().expect("post stored");
    assert_eq!(post.term_ids, vec![TermId(4), TermId(9)]);
    assert_eq!(post.slug, "tagged");

    let rejected = post_client
        .create_post(PostCreate {
            title: "Dangling".to_string(),
            term_ids: vec![TermId(99)],
            ..Default::default()
        })
        .await;
    assert_eq!(rejected, Err(PostError::UnknownTerm(TermId(99))));

    term_mock.verify();
    drop(post_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_post_store_reports_term_store_outage() {
    let mut term_mock = MockStore::<Term>::new();
    term_mock.expect_get(TermId(4)).return_err(StoreError::ActorClosed);

    let (post_actor, post_client) = simple_graph_api::post_store::new();
    let actor_handle = tokio::spawn(post_actor.run(TermClient::new(term_mock.client())));

    let result = post_client
        .create_post(PostCreate {
            term_ids: vec![TermId(4)],
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(PostError::TermLookup(_))));

    term_mock.verify();
    drop(post_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_post_actions_and_queries() {
    let mut term_mock = MockStore::<Term>::new();
    term_mock.expect_get(TermId(4)).return_ok(Some(term(4, "News")));

    let (post_actor, post_client) = simple_graph_api::post_store::new();
    let actor_handle = tokio::spawn(post_actor.run(TermClient::new(term_mock.client())));

    let first = post_client
        .create_post(PostCreate {
            author: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    let second = post_client
        .import_post(
            PostId(40),
            PostCreate {
                author: 3,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(first, PostId(1));
    assert_eq!(second, PostId(40));

    assert_eq!(post_client.set_meta(first, "color", "blue").await.unwrap(), None);
    assert_eq!(
        post_client.set_meta(first, "color", "red").await.unwrap(),
        Some("blue".to_string())
    );
    assert_eq!(
        post_client.attach_terms(first, vec![TermId(4)]).await.unwrap(),
        vec![TermId(4)]
    );
    assert!(post_client.detach_term(first, TermId(4)).await.unwrap());
    assert!(!post_client.detach_term(first, TermId(4)).await.unwrap());

    let by_author: Vec<Post> = post_client
        .query(PostFilter {
            authors_in: vec![3],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].id, PostId(40));

    let missing = post_client.set_meta(PostId(999), "k", "v").await;
    assert_eq!(missing, Err(PostError::NotFound("999".to_string())));

    term_mock.verify();
    drop(post_client);
    actor_handle.await.unwrap();
}

/// Real comment store with a mocked post store.
#[tokio::test]
async fn test_comment_store_requires_existing_post() {
    let mut post_mock = MockStore::<Post>::new();
    post_mock.expect_get(PostId(1)).return_ok(Some(Post::new(
        PostId(1),
        PostCreate::default(),
    )));
    post_mock.expect_get(PostId(2)).return_ok(None);

    let (comment_actor, comment_client) = simple_graph_api::comment_store::new();
    let actor_handle = tokio::spawn(comment_actor.run(PostClient::new(post_mock.client())));

    let id = comment_client
        .create_comment(CommentCreate {
            post_id: PostId(1),
            content: "Hi".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        comment_client.moderate(id, CommentStatus::Approved).await.unwrap(),
        CommentStatus::Pending
    );
    assert_eq!(comment_client.approved_for_post(PostId(1)).await.unwrap().len(), 1);

    let orphan = comment_client
        .create_comment(CommentCreate {
            post_id: PostId(2),
            ..Default::default()
        })
        .await;
    assert_eq!(orphan, Err(CommentError::UnknownPost(PostId(2))));

    post_mock.verify();
    drop(comment_client);
    actor_handle.await.unwrap();
}
