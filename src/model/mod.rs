//! Pure data structures held by the stores.
//!
//! Each resource type implements [`StoredResource`](content_store::StoredResource)
//! in its `*_store` module; this module only carries the data, its IDs, its
//! create/update payloads and its query filters.

pub mod comment;
pub mod post;
pub mod term;

pub use comment::*;
pub use post::*;
pub use term::*;

use std::collections::BTreeMap;

/// Per-resource metadata: key to string value, ordered by key.
pub type Meta = BTreeMap<String, String>;

/// Date format used when dates are exposed as field values.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Declares a numeric resource ID newtype usable as a store key.
macro_rules! resource_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use resource_id;
