//! Staged add/remove operations against the index service
//!
//! Single source of the immediate-vs-deferred visibility semantics: the
//! plain operations stage only, the `_now` variants stage and then commit.
//! The writer holds no durable state of its own; all side effects live on
//! the index-service collaborator.

use std::sync::Arc;

use crate::error::SyncError;
use crate::index_service::IndexService;
use crate::record::{Record, RecordId};
use crate::registry::{IndexableRegistry, IndexableType};

#[derive(Clone)]
pub struct IndexWriter {
    registry: Arc<IndexableRegistry>,
    index: IndexService,
}

impl IndexWriter {
    pub fn new(registry: Arc<IndexableRegistry>, index: IndexService) -> Self {
        Self { registry, index }
    }

    /// Stage an add for `record`. Visible to queries after the next commit.
    pub async fn index(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        let ty = self.lookup(type_name)?;
        let attributes = ty.snapshot(record);
        tracing::debug!("staging add for {}#{}", type_name, record.id());
        self.index
            .stage_add(type_name, record.id(), attributes)
            .await
            .map_err(|source| SyncError::staging(type_name, source))
    }

    /// Stage an add and commit immediately.
    ///
    /// Staging and commit are not atomic: on commit failure the add remains
    /// staged and a later commit may flush it.
    pub async fn index_now(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        self.index(type_name, record).await?;
        self.commit().await
    }

    /// Stage a delete for `record`'s identifier.
    pub async fn remove(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        self.remove_by_id(type_name, record.id()).await
    }

    /// Stage a delete for one identifier. Identifiers the index does not
    /// hold are a no-op, not an error.
    pub async fn remove_by_id(&self, type_name: &str, id: RecordId) -> Result<(), SyncError> {
        self.lookup(type_name)?;
        tracing::debug!("staging delete for {}#{}", type_name, id);
        self.index
            .stage_delete(type_name, id)
            .await
            .map_err(|source| SyncError::staging(type_name, source))
    }

    /// Stage a delete and commit immediately.
    pub async fn remove_now(&self, type_name: &str, record: &Record) -> Result<(), SyncError> {
        self.remove(type_name, record).await?;
        self.commit().await
    }

    /// Stage a delete of every document of `type_name`. Strictly scoped to
    /// that type.
    pub async fn remove_all(&self, type_name: &str) -> Result<(), SyncError> {
        self.lookup(type_name)?;
        tracing::debug!("staging delete-all for {}", type_name);
        self.index
            .stage_delete_all(type_name)
            .await
            .map_err(|source| SyncError::staging(type_name, source))
    }

    /// Stage a delete-all and commit immediately.
    pub async fn remove_all_now(&self, type_name: &str) -> Result<(), SyncError> {
        self.remove_all(type_name).await?;
        self.commit().await
    }

    /// Flush all staged operations across all types. Committing with
    /// nothing staged is a legal no-op.
    pub async fn commit(&self) -> Result<(), SyncError> {
        self.index.commit().await.map_err(SyncError::Commit)
    }

    fn lookup(&self, type_name: &str) -> Result<Arc<IndexableType>, SyncError> {
        self.registry
            .get(type_name)
            .cloned()
            .ok_or_else(|| SyncError::NotRegistered(type_name.to_string()))
    }
}
