//! Search index collaborator boundary
//!
//! The engine stages document operations here and flushes them with explicit
//! commits. Query ranking, transport, and retry policy all belong to the
//! backend behind [`IndexServiceBackend`].

pub mod error;
pub mod memory;
pub mod traits;

// Re-exports
pub use error::IndexServiceError;
pub use memory::MemoryIndexService;
pub use traits::IndexServiceBackend;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::RecordId;

/// One committed document matched by a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub id: RecordId,
    pub attributes: Map<String, Value>,
}

/// Exact-match query criteria evaluated by the index backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    restrictions: Vec<(String, Value)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to documents whose `field` equals `value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.restrictions.push((field.into(), value.into()));
        self
    }

    /// True when `attributes` satisfies every restriction.
    pub fn matches(&self, attributes: &Map<String, Value>) -> bool {
        self.restrictions
            .iter()
            .all(|(field, value)| attributes.get(field) == Some(value))
    }

    /// True when the query has no restrictions and matches everything.
    pub fn is_unrestricted(&self) -> bool {
        self.restrictions.is_empty()
    }
}

/// Index service with swappable backend
///
/// Clonable handle wrapping a backend implementation; every operation
/// delegates to the backend.
#[derive(Clone)]
pub struct IndexService {
    backend: Arc<dyn IndexServiceBackend>,
}

impl IndexService {
    pub fn new(backend: Arc<dyn IndexServiceBackend>) -> Self {
        Self { backend }
    }

    /// Create with the embedded in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryIndexService::new()))
    }

    // Delegate all methods to backend

    pub async fn stage_add(
        &self,
        type_name: &str,
        id: RecordId,
        attributes: Map<String, Value>,
    ) -> Result<(), IndexServiceError> {
        self.backend.stage_add(type_name, id, attributes).await
    }

    pub async fn stage_delete(
        &self,
        type_name: &str,
        id: RecordId,
    ) -> Result<(), IndexServiceError> {
        self.backend.stage_delete(type_name, id).await
    }

    pub async fn stage_delete_all(&self, type_name: &str) -> Result<(), IndexServiceError> {
        self.backend.stage_delete_all(type_name).await
    }

    pub async fn commit(&self) -> Result<(), IndexServiceError> {
        self.backend.commit().await
    }

    pub async fn list_ids(&self, type_name: &str) -> Result<Vec<RecordId>, IndexServiceError> {
        self.backend.list_ids(type_name).await
    }

    pub async fn query(
        &self,
        type_name: &str,
        query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, IndexServiceError> {
        self.backend.query(type_name, query).await
    }
}
