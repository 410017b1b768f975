//! Synchronization engine
//!
//! Composes the writer, reindexer, orphan reconciler, and search facade
//! over one pair of collaborator handles. Every operation is a synchronous
//! sequence of collaborator calls; the engine spawns nothing and takes no
//! locks of its own.

pub mod orphans;
pub mod reindex;
pub mod search;
pub mod writer;

// Re-exports
pub use orphans::OrphanReconciler;
pub use reindex::{BatchReindexer, DEFAULT_BATCH_SIZE, ReindexOptions, ReindexReport};
pub use search::SearchFacade;
pub use writer::IndexWriter;

use std::sync::Arc;

use crate::datastore::Datastore;
use crate::error::SyncError;
use crate::index_service::{IndexService, SearchQuery};
use crate::record::{Record, RecordId};
use crate::registry::IndexableRegistry;

/// Entry point for application code.
///
/// Owns the registry and the two collaborator handles, constructed once at
/// process startup and threaded through every component. Cloning is cheap;
/// clones share the same collaborators.
#[derive(Clone)]
pub struct SearchSync {
    registry: Arc<IndexableRegistry>,
    writer: IndexWriter,
    reindexer: BatchReindexer,
    orphans: OrphanReconciler,
    facade: SearchFacade,
}

impl SearchSync {
    pub fn new(
        registry: Arc<IndexableRegistry>,
        index: IndexService,
        datastore: Datastore,
    ) -> Self {
        Self {
            writer: IndexWriter::new(Arc::clone(&registry), index.clone()),
            reindexer: BatchReindexer::new(
                Arc::clone(&registry),
                index.clone(),
                datastore.clone(),
            ),
            orphans: OrphanReconciler::new(Arc::clone(&registry), index.clone(), datastore.clone()),
            facade: SearchFacade::new(Arc::clone(&registry), index, datastore),
            registry,
        }
    }

    /// True iff `type_name` has a registration. Pure lookup, never fails.
    pub fn searchable(&self, type_name: &str) -> bool {
        self.registry.is_registered(type_name)
    }

    /// Stage an add for `record` without committing.
    pub async fn index(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        self.writer.index(type_name, record).await
    }

    /// Stage an add and commit immediately.
    pub async fn index_now(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        self.writer.index_now(type_name, record).await
    }

    /// Stage a delete for `record`'s document without committing.
    pub async fn remove(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        self.writer.remove(type_name, record).await
    }

    /// Stage a delete for one identifier without committing.
    pub async fn remove_by_id(&self, type_name: &str, id: RecordId) -> Result<(), SyncError> {
        self.writer.remove_by_id(type_name, id).await
    }

    /// Stage a delete and commit immediately.
    pub async fn remove_now(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        self.writer.remove_now(type_name, record).await
    }

    /// Stage a delete of every document of `type_name` without committing.
    pub async fn remove_all(&self, type_name: &str) -> Result<(), SyncError> {
        self.writer.remove_all(type_name).await
    }

    /// Stage a delete-all and commit immediately.
    pub async fn remove_all_now(&self, type_name: &str) -> Result<(), SyncError> {
        self.writer.remove_all_now(type_name).await
    }

    /// Flush all staged operations across all types.
    pub async fn commit(&self) -> Result<(), SyncError> {
        self.writer.commit().await
    }

    /// Rebuild the entire index for `type_name`.
    pub async fn reindex(
        &self,
        type_name: &str,
        options: ReindexOptions,
    ) -> Result<ReindexReport, SyncError> {
        self.reindexer.reindex(type_name, options).await
    }

    /// Identifiers indexed for `type_name` whose backing record is gone.
    pub async fn index_orphans(&self, type_name: &str) -> Result<Vec<RecordId>, SyncError> {
        self.orphans.index_orphans(type_name).await
    }

    /// Stage deletes for all orphans of `type_name`; does not commit.
    pub async fn clean_index_orphans(&self, type_name: &str) -> Result<Vec<RecordId>, SyncError> {
        self.orphans.clean_index_orphans(type_name).await
    }

    /// Matching records loaded from the datastore, in hit order.
    pub async fn search(
        &self,
        type_name: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Record>, SyncError> {
        self.facade.search(type_name, query).await
    }

    /// Identifiers of committed documents matching `query`.
    pub async fn search_ids(
        &self,
        type_name: &str,
        query: &SearchQuery,
    ) -> Result<Vec<RecordId>, SyncError> {
        self.facade.search_ids(type_name, query).await
    }
}
