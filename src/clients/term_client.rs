use crate::model::{Term, TermCreate, TermFilter, TermId, TermUpdate};
use crate::term_store::{TermAction, TermActionResult, TermError};
use async_trait::async_trait;
use content_store::{StoreClient, StoreError, TypedClient};
use tracing::{debug, instrument};

/// Client for the term store.
#[derive(Clone)]
pub struct TermClient {
    inner: StoreClient<Term>,
}

impl TermClient {
    pub fn new(inner: StoreClient<Term>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_term(&self, params: TermCreate) -> Result<TermId, TermError> {
        debug!(?params, "create_term called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Inserts a term under a fixed ID, as done when seeding from fixtures.
    #[instrument(skip(self, params))]
    pub async fn import_term(&self, id: TermId, params: TermCreate) -> Result<TermId, TermError> {
        debug!(?params, "import_term called");
        self.inner.import(id, params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_term(&self, id: TermId, update: TermUpdate) -> Result<Term, TermError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, value))]
    pub async fn set_meta(
        &self,
        id: TermId,
        key: &str,
        value: &str,
    ) -> Result<Option<String>, TermError> {
        let action = TermAction::SetMeta {
            key: key.to_string(),
            value: value.to_string(),
        };
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            TermActionResult::SetMeta(previous) => Ok(previous),
            other => Err(TermError::StoreError(format!("Unexpected result: {other:?}"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_meta(&self, id: TermId, key: &str) -> Result<Option<String>, TermError> {
        match self
            .inner
            .perform_action(id, TermAction::DeleteMeta(key.to_string()))
            .await
            .map_err(Self::map_error)?
        {
            TermActionResult::DeleteMeta(removed) => Ok(removed),
            other => Err(TermError::StoreError(format!("Unexpected result: {other:?}"))),
        }
    }

    /// IDs of the terms in `taxonomy` whose slug is one of `slugs`, ascending.
    #[instrument(skip(self))]
    pub async fn ids_by_slug(
        &self,
        taxonomy: &str,
        slugs: Vec<String>,
    ) -> Result<Vec<TermId>, TermError> {
        let terms = self.query(TermFilter::slugs_in(taxonomy, slugs)).await?;
        Ok(terms.into_iter().map(|t| t.id).collect())
    }
}

#[async_trait]
impl TypedClient<Term> for TermClient {
    type Error = TermError;

    fn inner(&self) -> &StoreClient<Term> {
        &self.inner
    }

    fn map_error(e: StoreError) -> TermError {
        super::map_store_error(e, TermError::NotFound, TermError::StoreError)
    }
}
