//! # Store Client
//!
//! The async, cloneable handle used to talk to a [`StoreActor`](crate::StoreActor).

use crate::entity::StoredResource;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle on a store actor.
///
/// Holds only the sending half of the request channel, so cloning is cheap and
/// clones can be shared across tasks and request handlers. Every method sends
/// one request and waits for the actor's answer.
pub struct StoreClient<T: StoredResource> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoredResource> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoredResource> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    /// Inserts a resource under an explicit ID.
    pub async fn import(&self, id: T::Id, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| StoreRequest::Import {
            id,
            params,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Returns every resource matching `filter`, ordered by ascending ID.
    pub async fn query(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Query { filter, respond_to })
            .await
    }
}
