//! # TypedClient Trait
//!
//! Shared surface for resource-specific clients. A wrapper such as a
//! `PostClient` supplies its inner [`StoreClient`] and an error mapping, and
//! gets `get`, `query` and `delete` for free.
use crate::{StoreClient, StoreError, StoredResource};
use async_trait::async_trait;

/// Trait for resource-specific clients built on a [`StoreClient`].
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use content_store::{StoreClient, StoreError, StoredResource, TypedClient};
///
/// #[derive(Clone, Debug)] struct Tag { id: u64 }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
/// impl From<String> for TagError { fn from(s: String) -> Self { TagError(s) } }
///
/// #[async_trait]
/// impl StoredResource for Tag {
///     type Id = u64; type Create = (); type Update = ();
///     type Action = (); type ActionResult = (); type Filter = ();
///     type Context = (); type Error = TagError;
///     fn from_create_params(id: u64, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient { inner: StoreClient<Tag> }
///
/// #[async_trait]
/// impl TypedClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &StoreClient<Tag> { &self.inner }
///     fn map_error(e: StoreError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     let _ = client.get(1).await;
///     let _ = client.query(()).await;
/// }
/// ```
#[async_trait]
pub trait TypedClient<T: StoredResource>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store errors to the resource error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a resource by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every resource matching `filter`.
    #[tracing::instrument(skip(self))]
    async fn query(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(filter).await.map_err(Self::map_error)
    }

    /// Delete a resource by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
