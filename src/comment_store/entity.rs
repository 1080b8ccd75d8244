//! [`StoredResource`] implementation for [`Comment`].

use super::actions::{CommentAction, CommentActionResult};
use super::error::CommentError;
use crate::clients::PostClient;
use crate::model::{Comment, CommentCreate, CommentFilter, CommentId, CommentUpdate};
use async_trait::async_trait;
use content_store::{StoredResource, TypedClient};
use tracing::debug;

#[async_trait]
impl StoredResource for Comment {
    type Id = CommentId;
    type Create = CommentCreate;
    type Update = CommentUpdate;
    type Action = CommentAction;
    type ActionResult = CommentActionResult;
    type Filter = CommentFilter;
    type Context = PostClient;
    type Error = CommentError;

    fn from_create_params(id: CommentId, params: CommentCreate) -> Result<Self, CommentError> {
        Ok(Comment::new(id, params))
    }

    fn matches(&self, filter: &CommentFilter) -> bool {
        filter.matches(self)
    }

    async fn on_create(&mut self, posts: &PostClient) -> Result<(), CommentError> {
        debug!(comment_id = %self.id, post_id = %self.post_id, "Validating post");
        let post = posts
            .get(self.post_id)
            .await
            .map_err(|e| CommentError::PostLookup(e.to_string()))?;
        match post {
            Some(_) => Ok(()),
            None => Err(CommentError::UnknownPost(self.post_id)),
        }
    }

    async fn on_update(
        &mut self,
        update: CommentUpdate,
        _posts: &PostClient,
    ) -> Result<(), CommentError> {
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(url) = update.author_url {
            self.author_url = url;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CommentAction,
        _posts: &PostClient,
    ) -> Result<CommentActionResult, CommentError> {
        match action {
            CommentAction::SetMeta { key, value } => {
                if key.is_empty() {
                    return Err(CommentError::EmptyMetaKey);
                }
                Ok(CommentActionResult::SetMeta(self.meta.insert(key, value)))
            }
            CommentAction::DeleteMeta(key) => {
                Ok(CommentActionResult::DeleteMeta(self.meta.remove(&key)))
            }
            CommentAction::Moderate(status) => {
                let previous = std::mem::replace(&mut self.status, status);
                Ok(CommentActionResult::Moderate(previous))
            }
        }
    }
}
