//! Index service backend trait definition
//!
//! Defines the interface the synchronization engine requires from the
//! external search index.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::IndexServiceError;
use super::{SearchHit, SearchQuery};
use crate::record::RecordId;

/// Trait for index-service backends
///
/// Implementations must be Send + Sync for use with async runtimes.
/// Staged operations only become observable by `list_ids` and `query`
/// after a `commit`.
#[async_trait]
pub trait IndexServiceBackend: Send + Sync {
    /// Stage an add for one document. Replaces any earlier staged or
    /// committed document with the same identifier once committed.
    async fn stage_add(
        &self,
        type_name: &str,
        id: RecordId,
        attributes: Map<String, Value>,
    ) -> Result<(), IndexServiceError>;

    /// Stage a delete for one document. Absent identifiers are a no-op.
    async fn stage_delete(&self, type_name: &str, id: RecordId) -> Result<(), IndexServiceError>;

    /// Stage a delete of every document of a type.
    async fn stage_delete_all(&self, type_name: &str) -> Result<(), IndexServiceError>;

    /// Flush all staged operations process-wide, making them visible to
    /// subsequent queries. Legal no-op when nothing is staged.
    async fn commit(&self) -> Result<(), IndexServiceError>;

    /// Identifiers currently committed for a type, ascending.
    async fn list_ids(&self, type_name: &str) -> Result<Vec<RecordId>, IndexServiceError>;

    /// Evaluate a query against the committed documents of a type.
    async fn query(
        &self,
        type_name: &str,
        query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, IndexServiceError>;
}
