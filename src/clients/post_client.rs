use crate::model::{Post, PostCreate, PostId, PostUpdate, TermId};
use crate::post_store::{PostAction, PostActionResult, PostError};
use async_trait::async_trait;
use content_store::{StoreClient, StoreError, TypedClient};
use tracing::{debug, instrument};

/// Client for the post store.
///
/// Term validation happens inside the post store's `on_create` hook, so callers
/// only ever see a fully validated post come back.
#[derive(Clone)]
pub struct PostClient {
    inner: StoreClient<Post>,
}

impl PostClient {
    pub fn new(inner: StoreClient<Post>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_post(&self, params: PostCreate) -> Result<PostId, PostError> {
        debug!(?params, "create_post called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, params))]
    pub async fn import_post(&self, id: PostId, params: PostCreate) -> Result<PostId, PostError> {
        debug!(?params, "import_post called");
        self.inner.import(id, params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_post(&self, id: PostId, update: PostUpdate) -> Result<Post, PostError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    async fn action(&self, id: PostId, action: PostAction) -> Result<PostActionResult, PostError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, value))]
    pub async fn set_meta(
        &self,
        id: PostId,
        key: &str,
        value: &str,
    ) -> Result<Option<String>, PostError> {
        let action = PostAction::SetMeta {
            key: key.to_string(),
            value: value.to_string(),
        };
        match self.action(id, action).await? {
            PostActionResult::SetMeta(previous) => Ok(previous),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_meta(&self, id: PostId, key: &str) -> Result<Option<String>, PostError> {
        match self.action(id, PostAction::DeleteMeta(key.to_string())).await? {
            PostActionResult::DeleteMeta(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn attach_terms(
        &self,
        id: PostId,
        terms: Vec<TermId>,
    ) -> Result<Vec<TermId>, PostError> {
        match self.action(id, PostAction::AttachTerms(terms)).await? {
            PostActionResult::AttachTerms(attached) => Ok(attached),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn detach_term(&self, id: PostId, term: TermId) -> Result<bool, PostError> {
        match self.action(id, PostAction::DetachTerm(term)).await? {
            PostActionResult::DetachTerm(was_attached) => Ok(was_attached),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: PostActionResult) -> PostError {
    PostError::StoreError(format!("Unexpected result: {result:?}"))
}

#[async_trait]
impl TypedClient<Post> for PostClient {
    type Error = PostError;

    fn inner(&self) -> &StoreClient<Post> {
        &self.inner
    }

    fn map_error(e: StoreError) -> PostError {
        super::map_store_error(e, PostError::NotFound, PostError::StoreError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_store::mock::{self, MockStore};

    #[tokio::test]
    async fn test_attach_terms_sends_action() {
        let (client, mut receiver) = mock::create_mock_client::<Post>(10);
        let client = PostClient::new(client);

        let task = tokio::spawn(async move {
            client
                .attach_terms(PostId(4), vec![TermId(2), TermId(9)])
                .await
        });

        let (id, action, responder) = mock::expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, PostId(4));
        assert!(matches!(
            action,
            PostAction::AttachTerms(ref ids) if ids == &[TermId(2), TermId(9)]
        ));
        responder
            .send(Ok(PostActionResult::AttachTerms(vec![TermId(2), TermId(9)])))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), vec![TermId(2), TermId(9)]);
    }

    #[tokio::test]
    async fn test_unknown_term_error_survives_the_store() {
        let mut mock = MockStore::<Post>::new();
        mock.expect_create()
            .return_err(StoreError::EntityError(Box::new(PostError::UnknownTerm(TermId(5)))));

        let client = PostClient::new(mock.client());
        let result = client.create_post(PostCreate::default()).await;

        assert_eq!(result, Err(PostError::UnknownTerm(TermId(5))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_post_on_update() {
        let mut mock = MockStore::<Post>::new();
        mock.expect_update(PostId(9))
            .return_err(StoreError::NotFound("9".to_string()));

        let client = PostClient::new(mock.client());
        let result = client.update_post(PostId(9), PostUpdate::default()).await;

        assert_eq!(result, Err(PostError::NotFound("9".to_string())));
        mock.verify();
    }
}
