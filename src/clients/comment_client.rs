use crate::comment_store::{CommentAction, CommentActionResult, CommentError};
use crate::model::{Comment, CommentCreate, CommentFilter, CommentId, CommentStatus, PostId};
use async_trait::async_trait;
use content_store::{StoreClient, StoreError, TypedClient};
use tracing::{debug, instrument};

/// Client for the comment store.
#[derive(Clone)]
pub struct CommentClient {
    inner: StoreClient<Comment>,
}

impl CommentClient {
    pub fn new(inner: StoreClient<Comment>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_comment(&self, params: CommentCreate) -> Result<CommentId, CommentError> {
        debug!(?params, "create_comment called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, params))]
    pub async fn import_comment(
        &self,
        id: CommentId,
        params: CommentCreate,
    ) -> Result<CommentId, CommentError> {
        debug!(?params, "import_comment called");
        self.inner.import(id, params).await.map_err(Self::map_error)
    }

    /// Moves a comment to `status`, returning the status it had before.
    #[instrument(skip(self))]
    pub async fn moderate(
        &self,
        id: CommentId,
        status: CommentStatus,
    ) -> Result<CommentStatus, CommentError> {
        match self.action(id, CommentAction::Moderate(status)).await? {
            CommentActionResult::Moderate(previous) => Ok(previous),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, value))]
    pub async fn set_meta(
        &self,
        id: CommentId,
        key: &str,
        value: &str,
    ) -> Result<Option<String>, CommentError> {
        let action = CommentAction::SetMeta {
            key: key.to_string(),
            value: value.to_string(),
        };
        match self.action(id, action).await? {
            CommentActionResult::SetMeta(previous) => Ok(previous),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_meta(
        &self,
        id: CommentId,
        key: &str,
    ) -> Result<Option<String>, CommentError> {
        match self.action(id, CommentAction::DeleteMeta(key.to_string())).await? {
            CommentActionResult::DeleteMeta(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    /// Approved comments on `post_id`, ascending by ID.
    #[instrument(skip(self))]
    pub async fn approved_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, CommentError> {
        self.query(CommentFilter::approved_on(post_id)).await
    }

    async fn action(
        &self,
        id: CommentId,
        action: CommentAction,
    ) -> Result<CommentActionResult, CommentError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: CommentActionResult) -> CommentError {
    CommentError::StoreError(format!("Unexpected result: {result:?}"))
}

#[async_trait]
impl TypedClient<Comment> for CommentClient {
    type Error = CommentError;

    fn inner(&self) -> &StoreClient<Comment> {
        &self.inner
    }

    fn map_error(e: StoreError) -> CommentError {
        super::map_store_error(e, CommentError::NotFound, CommentError::StoreError)
    }
}
