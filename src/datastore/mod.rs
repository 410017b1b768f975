//! Primary datastore collaborator boundary
//!
//! The system of record the index is kept consistent with. The engine reads
//! through this boundary only; it never writes to the datastore.

pub mod error;
pub mod memory;
pub mod traits;

// Re-exports
pub use error::DatastoreError;
pub use memory::MemoryDatastore;
pub use traits::DatastoreBackend;

use std::sync::Arc;

use crate::record::{Record, RecordId};

/// One paginated fetch issued during a reindex.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Record type to fetch.
    pub type_name: String,
    /// Cursor: only records whose primary key is strictly greater than this
    /// are returned. Zero is the empty sentinel.
    pub after: RecordId,
    /// Page size; `None` fetches the remainder unbounded.
    pub limit: Option<usize>,
    /// Primary-key column the page is ordered by, ascending.
    pub order_by: String,
    /// Opaque eager-load hints forwarded to the datastore.
    pub include: Vec<String>,
}

/// Datastore with swappable backend
#[derive(Clone)]
pub struct Datastore {
    backend: Arc<dyn DatastoreBackend>,
}

impl Datastore {
    pub fn new(backend: Arc<dyn DatastoreBackend>) -> Self {
        Self { backend }
    }

    /// Create with the embedded in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDatastore::new()))
    }

    // Delegate all methods to backend

    pub async fn count(&self, type_name: &str) -> Result<usize, DatastoreError> {
        self.backend.count(type_name).await
    }

    pub async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Record>, DatastoreError> {
        self.backend.fetch_page(request).await
    }

    pub async fn exists(&self, type_name: &str, id: RecordId) -> Result<bool, DatastoreError> {
        self.backend.exists(type_name, id).await
    }

    pub async fn load(
        &self,
        type_name: &str,
        ids: &[RecordId],
    ) -> Result<Vec<Record>, DatastoreError> {
        self.backend.load(type_name, ids).await
    }
}
