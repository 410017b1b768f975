//! Orphan detection and repair
//!
//! An orphan is an index document whose backing datastore record no longer
//! exists. Detection diffs the committed index identifiers against datastore
//! existence; repair stages a delete per orphan without committing.

use std::sync::Arc;

use crate::datastore::Datastore;
use crate::error::SyncError;
use crate::index_service::IndexService;
use crate::record::RecordId;
use crate::registry::IndexableRegistry;

#[derive(Clone)]
pub struct OrphanReconciler {
    registry: Arc<IndexableRegistry>,
    index: IndexService,
    datastore: Datastore,
}

impl OrphanReconciler {
    pub fn new(registry: Arc<IndexableRegistry>, index: IndexService, datastore: Datastore) -> Self {
        Self {
            registry,
            index,
            datastore,
        }
    }

    /// Identifiers the index holds for `type_name` with no living datastore
    /// record, in index-listing order. Read-only.
    pub async fn index_orphans(&self, type_name: &str) -> Result<Vec<RecordId>, SyncError> {
        if !self.registry.is_registered(type_name) {
            return Err(SyncError::NotRegistered(type_name.to_string()));
        }

        let ids = self
            .index
            .list_ids(type_name)
            .await
            .map_err(SyncError::Query)?;

        let mut orphans = Vec::new();
        for id in ids {
            let alive = self
                .datastore
                .exists(type_name, id)
                .await
                .map_err(|source| SyncError::fetch(type_name, source))?;
            if !alive {
                orphans.push(id);
            }
        }

        tracing::debug!("{} orphaned {} documents", orphans.len(), type_name);
        Ok(orphans)
    }

    /// Stage a delete for every orphan of `type_name`; does not commit.
    /// Returns the identifiers staged for removal.
    pub async fn clean_index_orphans(&self, type_name: &str) -> Result<Vec<RecordId>, SyncError> {
        let orphans = self.index_orphans(type_name).await?;
        for id in &orphans {
            self.index
                .stage_delete(type_name, *id)
                .await
                .map_err(|source| SyncError::staging(type_name, source))?;
        }
        if !orphans.is_empty() {
            tracing::info!(
                "staged removal of {} orphaned {} documents",
                orphans.len(),
                type_name
            );
        }
        Ok(orphans)
    }
}
