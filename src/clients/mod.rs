//! Type-safe wrappers around [`StoreClient`](content_store::StoreClient).
//!
//! Each client implements [`TypedClient`](content_store::TypedClient) for
//! `get`/`query`/`delete` and adds resource-specific calls on top.

pub mod comment_client;
pub mod post_client;
pub mod term_client;

pub use comment_client::*;
pub use post_client::*;
pub use term_client::*;

use content_store::StoreError;

/// Maps a store error onto a resource error type.
///
/// Errors raised by the resource's own hooks come back boxed inside
/// [`StoreError::EntityError`] and are unwrapped to their original value;
/// anything else becomes `other(message)`.
pub(crate) fn map_store_error<E>(
    e: StoreError,
    not_found: fn(String) -> E,
    other: fn(String) -> E,
) -> E
where
    E: std::error::Error + 'static,
{
    match e {
        StoreError::NotFound(id) => not_found(id),
        StoreError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(original) => *original,
            Err(inner) => other(inner.to_string()),
        },
        e => other(e.to_string()),
    }
}
