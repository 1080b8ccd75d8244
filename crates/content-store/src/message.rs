//! # Store Messages
//!
//! The request envelope exchanged between a [`StoreClient`](crate::StoreClient)
//! and its [`StoreActor`](crate::StoreActor).

use crate::entity::StoredResource;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A request sent to a store actor.
///
/// Besides the CRUD lifecycle and custom `Action`s, a store understands two
/// operations a read-mostly content store needs:
///
/// - **Import**: insert a resource under a caller-chosen ID (fixtures, migrations).
///   The actor's ID counter is moved past the imported ID.
/// - **Query**: return a snapshot of every resource matching a
///   [`StoredResource::Filter`], in ascending ID order.
#[derive(Debug)]
pub enum StoreRequest<T: StoredResource> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Import {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Query {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
}
