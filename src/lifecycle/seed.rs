//! Fixture seeding.
//!
//! A fixture is a JSON document with `terms`, `posts` and `comments` arrays.
//! Every entry carries its `id` next to the fields of the matching create
//! payload, and is imported under that ID. Terms go first, then posts, then
//! comments, since each store validates references into the previous one.
//!
//! ```json
//! {
//!   "terms":    [{ "id": 4, "name": "News", "taxonomy": "category" }],
//!   "posts":    [{ "id": 1, "title": "Hello", "term_ids": [4], "date": "2024-03-01T09:00:00" }],
//!   "comments": [{ "id": 7, "post_id": 1, "author": "Ana", "status": "approved" }]
//! }
//! ```

use super::ContentSystem;
use crate::comment_store::CommentError;
use crate::model::{CommentCreate, CommentId, PostCreate, PostId, TermCreate, TermId};
use crate::post_store::PostError;
use crate::term_store::TermError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub terms: Vec<FixtureEntry<TermId, TermCreate>>,
    pub posts: Vec<FixtureEntry<PostId, PostCreate>>,
    pub comments: Vec<FixtureEntry<CommentId, CommentCreate>>,
}

/// A create payload with the ID it is imported under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureEntry<I, P> {
    pub id: I,
    #[serde(flatten)]
    pub params: P,
}

/// How many resources of each kind were imported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub terms: usize,
    pub posts: usize,
    pub comments: usize,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to import term: {0}")]
    Term(#[from] TermError),

    #[error("Failed to import post: {0}")]
    Post(#[from] PostError),

    #[error("Failed to import comment: {0}")]
    Comment(#[from] CommentError),
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&json)
    }
}

/// Imports `fixture` into `system`, stopping at the first rejected entry.
pub async fn seed(system: &ContentSystem, fixture: Fixture) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for entry in fixture.terms {
        system.term_client.import_term(entry.id, entry.params).await?;
        report.terms += 1;
    }
    for entry in fixture.posts {
        system.post_client.import_post(entry.id, entry.params).await?;
        report.posts += 1;
    }
    for entry in fixture.comments {
        system
            .comment_client
            .import_comment(entry.id, entry.params)
            .await?;
        report.comments += 1;
    }

    info!(
        terms = report.terms,
        posts = report.posts,
        comments = report.comments,
        "Fixture imported"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommentStatus, PostStatus};

    #[test]
    fn fixture_entries_flatten_their_payload() {
        let fixture = Fixture::from_json(
            r#"{
                "terms": [{"id": 4, "name": "News"}],
                "posts": [{"id": 1, "title": "Hello", "term_ids": [4],
                           "date": "2024-03-01T09:00:00", "meta": {"color": "blue"}}],
                "comments": [{"id": 7, "post_id": 1, "status": "approved"}]
            }"#,
        )
        .unwrap();

        assert_eq!(fixture.terms[0].id, TermId(4));
        assert_eq!(fixture.terms[0].params.taxonomy, "category");
        assert_eq!(fixture.posts[0].params.post_type, "post");
        assert_eq!(fixture.posts[0].params.status, PostStatus::Publish);
        assert_eq!(fixture.posts[0].params.term_ids, vec![TermId(4)]);
        assert_eq!(fixture.posts[0].params.meta["color"], "blue");
        assert_eq!(fixture.comments[0].params.status, CommentStatus::Approved);
    }

    #[tokio::test]
    async fn seeding_rejects_dangling_references() {
        let system = ContentSystem::new();
        let fixture = Fixture::from_json(
            r#"{"posts": [{"id": 1, "title": "Orphan", "term_ids": [99]}]}"#,
        )
        .unwrap();

        let result = seed(&system, fixture).await;
        assert!(matches!(
            result,
            Err(SeedError::Post(PostError::UnknownTerm(TermId(99))))
        ));
        system.shutdown().await.unwrap();
    }
}
