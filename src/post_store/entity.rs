//! [`StoredResource`] implementation for [`Post`].
//!
//! `on_create` and the `AttachTerms` action reach out to the term store through
//! the [`TermClient`] context. A post is never stored with a dangling term ID.

use super::actions::{PostAction, PostActionResult};
use super::error::PostError;
use crate::clients::TermClient;
use crate::model::{Post, PostCreate, PostFilter, PostId, PostUpdate, TermId};
use async_trait::async_trait;
use content_store::{StoredResource, TypedClient};
use tracing::debug;

async fn ensure_terms_exist(terms: &TermClient, ids: &[TermId]) -> Result<(), PostError> {
    for &id in ids {
        let found = terms
            .get(id)
            .await
            .map_err(|e| PostError::TermLookup(e.to_string()))?;
        if found.is_none() {
            return Err(PostError::UnknownTerm(id));
        }
    }
    Ok(())
}

#[async_trait]
impl StoredResource for Post {
    type Id = PostId;
    type Create = PostCreate;
    type Update = PostUpdate;
    type Action = PostAction;
    type ActionResult = PostActionResult;
    type Filter = PostFilter;
    type Context = TermClient;
    type Error = PostError;

    fn from_create_params(id: PostId, params: PostCreate) -> Result<Self, PostError> {
        if params.post_type.trim().is_empty() {
            return Err(PostError::EmptyPostType);
        }
        Ok(Post::new(id, params))
    }

    fn matches(&self, filter: &PostFilter) -> bool {
        filter.matches(self)
    }

    /// Drops duplicate term IDs, then checks each remaining one exists.
    async fn on_create(&mut self, terms: &TermClient) -> Result<(), PostError> {
        let mut seen = Vec::with_capacity(self.term_ids.len());
        self.term_ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        debug!(post_id = %self.id, terms = self.term_ids.len(), "Validating terms");
        ensure_terms_exist(terms, &self.term_ids).await
    }

    async fn on_update(
        &mut self,
        update: PostUpdate,
        _terms: &TermClient,
    ) -> Result<(), PostError> {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(excerpt) = update.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(modified) = update.modified {
            self.modified = modified;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PostAction,
        terms: &TermClient,
    ) -> Result<PostActionResult, PostError> {
        match action {
            PostAction::SetMeta { key, value } => {
                if key.is_empty() {
                    return Err(PostError::EmptyMetaKey);
                }
                Ok(PostActionResult::SetMeta(self.meta.insert(key, value)))
            }
            PostAction::DeleteMeta(key) => Ok(PostActionResult::DeleteMeta(self.meta.remove(&key))),
            PostAction::AttachTerms(ids) => {
                ensure_terms_exist(terms, &ids).await?;
                for id in ids {
                    if !self.term_ids.contains(&id) {
                        self.term_ids.push(id);
                    }
                }
                Ok(PostActionResult::AttachTerms(self.term_ids.clone()))
            }
            PostAction::DetachTerm(id) => {
                let before = self.term_ids.len();
                self.term_ids.retain(|t| *t != id);
                Ok(PostActionResult::DetachTerm(before != self.term_ids.len()))
            }
        }
    }
}
