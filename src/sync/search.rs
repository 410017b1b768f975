//! Query pass-through and result materialization
//!
//! The index evaluates queries; results are materialized as living records
//! loaded from the datastore by identifier, in hit order. Identifiers whose
//! backing record has been deleted are skipped.

use std::sync::Arc;

use crate::datastore::Datastore;
use crate::error::SyncError;
use crate::index_service::{IndexService, SearchQuery};
use crate::record::{Record, RecordId};
use crate::registry::IndexableRegistry;

#[derive(Clone)]
pub struct SearchFacade {
    registry: Arc<IndexableRegistry>,
    index: IndexService,
    datastore: Datastore,
}

impl SearchFacade {
    pub fn new(registry: Arc<IndexableRegistry>, index: IndexService, datastore: Datastore) -> Self {
        Self {
            registry,
            index,
            datastore,
        }
    }

    /// Identifiers of committed documents matching `query`.
    pub async fn search_ids(
        &self,
        type_name: &str,
        query: &SearchQuery,
    ) -> Result<Vec<RecordId>, SyncError> {
        if !self.registry.is_registered(type_name) {
            return Err(SyncError::NotRegistered(type_name.to_string()));
        }
        let hits = self
            .index
            .query(type_name, query)
            .await
            .map_err(SyncError::Query)?;
        Ok(hits.into_iter().map(|hit| hit.id).collect())
    }

    /// Matching records loaded from the datastore, in hit order.
    pub async fn search(
        &self,
        type_name: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Record>, SyncError> {
        let ids = self.search_ids(type_name, query).await?;
        self.datastore
            .load(type_name, &ids)
            .await
            .map_err(|source| SyncError::fetch(type_name, source))
    }
}
