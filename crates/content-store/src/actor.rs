//! # Store Actor
//!
//! `StoreActor<T>` is the server half of a store. It owns an ordered map of
//! resources and the receiving end of the request channel, and processes
//! requests one at a time, so the map needs no lock.

use crate::client::StoreClient;
use crate::entity::StoredResource;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that holds every resource of one kind.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new()` returns the actor and a [`StoreClient`].
/// 2. **Wire**: pass the dependencies the resource hooks need to `run(context)`.
/// 3. **Run**: spawn `run` on a Tokio task; it exits once every client is dropped.
///
/// ```rust
/// use async_trait::async_trait;
/// use content_store::{StoreActor, StoredResource};
///
/// #[derive(Clone, Debug)] struct Note { id: u64, body: String }
/// #[derive(Debug)] struct NoteCreate { body: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl StoredResource for Note {
///     type Id = u64; type Create = NoteCreate; type Update = String;
///     type Action = (); type ActionResult = (); type Filter = ();
///     type Context = (); type Error = NoteError;
///
///     fn from_create_params(id: u64, params: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, body: params.body })
///     }
///     async fn on_update(&mut self, body: String, _: &()) -> Result<(), NoteError> {
///         self.body = body;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Note>::new(8);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(NoteCreate { body: "hello".into() }).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().body, "hello");
/// }
/// ```
///
/// # Operations
///
/// * **Create** takes the next counter value as ID, builds the resource, runs
///   `on_create` and stores it.
/// * **Import** does the same with a caller-chosen ID, refusing IDs already in
///   use and moving the counter past the imported one.
/// * **Get** returns a clone, or `None`.
/// * **Update** / **Action** mutate in place through the resource hooks.
/// * **Delete** runs `on_delete` and removes the resource.
/// * **Query** returns clones of every resource whose `matches` accepts the
///   filter, in ascending ID order.
pub struct StoreActor<T: StoredResource> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u64,
}

impl<T: StoredResource> StoreActor<T> {
    /// Creates the actor and its client. `buffer_size` bounds the request queue;
    /// clients wait for room when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// `context` is handed to every resource hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    // The counter stops at u64::MAX; a taken ID there means it is spent.
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Create refused, ID counter exhausted");
                        let _ = respond_to.send(Err(StoreError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    self.next_id = self.next_id.saturating_add(1);
                    let result = self.insert_new(entity_type, id, params, &context).await;
                    let _ = respond_to.send(result);
                }
                StoreRequest::Import {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Import");
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Import refused, ID in use");
                        let _ = respond_to.send(Err(StoreError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    let result = self.insert_new(entity_type, id, params, &context).await;
                    if result.is_ok() {
                        let imported: u64 = id.into();
                        self.next_id = self.next_id.max(imported.saturating_add(1));
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    match item.on_update(update, &context).await {
                        Ok(()) => {
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| StoreError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Query { filter, respond_to } => {
                    let matched: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, matched = matched.len(), "Query");
                    let _ = respond_to.send(Ok(matched));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn insert_new(
        &mut self,
        entity_type: &str,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, StoreError> {
        let mut item = T::from_create_params(id, params).map_err(|e| {
            warn!(entity_type, %id, error = %e, "Create failed");
            StoreError::EntityError(Box::new(e))
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, %id, error = %e, "on_create failed");
            return Err(StoreError::EntityError(Box::new(e)));
        }
        self.store.insert(id, item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }
}
