//! Error taxonomy for synchronization operations
//!
//! The engine never retries on its own; every failure is surfaced to the
//! caller once. The only silent case is deleting an identifier the index
//! does not hold, which the index service treats as a no-op.

use thiserror::Error;

use crate::datastore::DatastoreError;
use crate::index_service::IndexServiceError;

/// Errors surfaced by the synchronization engine
#[derive(Error, Debug)]
pub enum SyncError {
    /// An operation was invoked for a type with no registry entry.
    /// Raised before any collaborator call.
    #[error("type `{0}` is not registered for search")]
    NotRegistered(String),

    /// The index service rejected a staged add or delete. The operation is
    /// abandoned; sibling operations are unaffected.
    #[error("staging failed for `{type_name}`")]
    Staging {
        type_name: String,
        #[source]
        source: IndexServiceError,
    },

    /// A commit failed. Operations staged for that commit remain staged and
    /// may succeed on a later commit attempt.
    #[error("commit failed")]
    Commit(#[source] IndexServiceError),

    /// A datastore call failed. During a reindex this aborts the run,
    /// leaving partially-rebuilt index state as-is.
    #[error("datastore fetch failed for `{type_name}`")]
    Fetch {
        type_name: String,
        #[source]
        source: DatastoreError,
    },

    /// An index-side read (listing identifiers or evaluating a query)
    /// failed.
    #[error("index query failed")]
    Query(#[source] IndexServiceError),
}

impl SyncError {
    pub(crate) fn staging(type_name: &str, source: IndexServiceError) -> Self {
        Self::Staging {
            type_name: type_name.to_string(),
            source,
        }
    }

    pub(crate) fn fetch(type_name: &str, source: DatastoreError) -> Self {
        Self::Fetch {
            type_name: type_name.to_string(),
            source,
        }
    }
}
