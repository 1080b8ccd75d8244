//! # Mock Store & Testing Guide
//!
//! [`MockStore<T>`] hands out a real [`StoreClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! test code *around* a store (typed clients, resolvers, hooks that call other
//! stores) deterministically, including failures that are awkward to provoke
//! with a real actor.
//!
//! | | MockStore | Real StoreActor |
//! |---|---|---|
//! | **State** | none, answers are scripted | real map, real hooks |
//! | **Error injection** | `return_err(...)` | needs specific state |
//! | **Use case** | code that *calls* a store | the store itself, full system |
//!
//! ```rust
//! use async_trait::async_trait;
//! use content_store::mock::MockStore;
//! use content_store::{StoreError, StoredResource};
//!
//! #[derive(Clone, Debug, PartialEq)] struct Page { id: u64, title: String }
//! #[derive(Debug, thiserror::Error)] #[error("page error")] struct PageError;
//!
//! #[async_trait]
//! impl StoredResource for Page {
//!     type Id = u64; type Create = String; type Update = ();
//!     type Action = (); type ActionResult = (); type Filter = ();
//!     type Context = (); type Error = PageError;
//!     fn from_create_params(id: u64, title: String) -> Result<Self, PageError> {
//!         Ok(Self { id, title })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), PageError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), PageError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Page>::new();
//!     mock.expect_get(7).return_ok(Some(Page { id: 7, title: "About".into() }));
//!     mock.expect_query().return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(7).await.unwrap().unwrap().title, "About");
//!     assert!(matches!(client.query(()).await, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For lower-level control, [`create_mock_client`] returns a client plus the raw
//! request receiver, and the `expect_*` helpers pop typed requests off it.

use crate::client::StoreClient;
use crate::entity::StoredResource;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A scripted answer, consumed in FIFO order.
enum Expectation<T: StoredResource> {
    Get(Result<Option<T>, StoreError>),
    Create(Result<T::Id, StoreError>),
    Import(Result<T::Id, StoreError>),
    Update(Result<T, StoreError>),
    Delete(Result<(), StoreError>),
    Action(Result<T::ActionResult, StoreError>),
    Query(Result<Vec<T>, StoreError>),
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: StoredResource>(expectations: &Expectations<T>, expectation: Expectation<T>) {
    expectations
        .lock()
        .expect("mock expectations poisoned")
        .push_back(expectation);
}

/// A store stand-in that answers requests from queued expectations.
///
/// A request that arrives with no matching expectation at the head of the queue
/// panics inside the mock task, which surfaces as `StoreError::ActorDropped` on
/// the caller's side.
pub struct MockStore<T: StoredResource> {
    client: StoreClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoredResource> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoredResource> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("mock expectations poisoned").pop_front();
                match (request, next) {
                    (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Import { respond_to, .. }, Some(Expectation::Import(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Query { respond_to, .. }, Some(Expectation::Query(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, _) => {
                        panic!("Unexpected store request: {request:?}");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_import(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Import)
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_delete(&mut self, _id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Delete)
    }

    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Expectation::Action)
    }

    pub fn expect_query(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::Query)
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation with the answer the mock should give.
pub struct ExpectationBuilder<T: StoredResource, R> {
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    expectations: Expectations<T>,
}

impl<T: StoredResource, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        push(&self.expectations, (self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, (self.wrap)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
pub fn create_mock_client<T: StoredResource>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Pops the next request, expecting a `Get`.
pub async fn expect_get<T: StoredResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Pops the next request, expecting an `Action`.
pub async fn expect_action<T: StoredResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Pops the next request, expecting a `Query`.
pub async fn expect_query<T: StoredResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Query { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Label {
        id: u64,
        text: String,
    }

    #[derive(Debug)]
    struct LabelFilter {
        prefix: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Label error")]
    struct LabelError;

    #[async_trait]
    impl StoredResource for Label {
        type Id = u64;
        type Create = String;
        type Update = String;
        type Action = ();
        type ActionResult = ();
        type Filter = LabelFilter;
        type Context = ();
        type Error = LabelError;

        fn from_create_params(id: u64, text: String) -> Result<Self, Self::Error> {
            Ok(Self { id, text })
        }

        fn matches(&self, filter: &LabelFilter) -> bool {
            self.text.starts_with(&filter.prefix)
        }

        async fn on_update(&mut self, text: String, _ctx: &()) -> Result<(), Self::Error> {
            self.text = text;
            Ok(())
        }

        async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_raw_channel_query() {
        let (client, mut receiver) = create_mock_client::<Label>(10);

        let task = tokio::spawn(async move {
            client
                .query(LabelFilter {
                    prefix: "rust".to_string(),
                })
                .await
        });

        let (filter, responder) = expect_query(&mut receiver)
            .await
            .expect("Expected Query request");
        assert_eq!(filter.prefix, "rust");
        responder
            .send(Ok(vec![Label {
                id: 3,
                text: "rustacean".to_string(),
            }]))
            .unwrap();

        let labels = task.await.unwrap().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].id, 3);
    }

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::<Label>::new();
        mock.expect_import().return_ok(42);
        mock.expect_get(42).return_ok(Some(Label {
            id: 42,
            text: "answer".to_string(),
        }));
        mock.expect_get(43).return_ok(None);

        let client = mock.client();
        assert_eq!(client.import(42, "answer".to_string()).await.unwrap(), 42);
        assert_eq!(client.get(42).await.unwrap().unwrap().text, "answer");
        assert!(client.get(43).await.unwrap().is_none());

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_store_error_injection() {
        let mut mock = MockStore::<Label>::new();
        mock.expect_action(1).return_err(StoreError::NotFound("1".to_string()));

        let result = mock.client().perform_action(1, ()).await;
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "1"));
        mock.verify();
    }
}
