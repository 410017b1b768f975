//! Full rebuild of a type's index in bounded-memory batches
//!
//! Stages a delete-all, then pages the datastore with an ascending
//! primary-key cursor and stages every fetched record, committing per page
//! or once at the end. The cursor is stable under deletions ahead of it; it
//! does not protect against records inserted behind it, which is an accepted
//! limitation of the rebuild.

use std::sync::Arc;

use crate::datastore::{Datastore, PageRequest};
use crate::error::SyncError;
use crate::index_service::IndexService;
use crate::record::RecordId;
use crate::registry::IndexableRegistry;

/// Page size used when [`ReindexOptions::batch_size`] is left at its
/// default.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Options for one reindex run.
#[derive(Debug, Clone)]
pub struct ReindexOptions {
    /// Records fetched and staged per page. `None` fetches the entire
    /// dataset in one unbounded page.
    pub batch_size: Option<usize>,
    /// Eager-load hints for the datastore fetches. `None` falls back to the
    /// type's configured default.
    pub include: Option<Vec<String>>,
    /// Commit after every page when true; commit exactly once after the
    /// final page when false.
    pub batch_commit: bool,
}

impl Default for ReindexOptions {
    fn default() -> Self {
        Self {
            batch_size: Some(DEFAULT_BATCH_SIZE),
            include: None,
            batch_commit: true,
        }
    }
}

impl ReindexOptions {
    /// Fetch and stage the entire dataset in one unbounded pass.
    pub fn unbounded() -> Self {
        Self {
            batch_size: None,
            ..Self::default()
        }
    }
}

/// Summary of one reindex run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReindexReport {
    /// Record count reported by the datastore at the start of the run.
    pub total: usize,
    /// Records staged for addition.
    pub staged: usize,
    /// Pages fetched; zero when the dataset is empty.
    pub batches: usize,
    /// Commits issued during the run.
    pub commits: usize,
}

/// Rebuilds the entire index for one record type.
#[derive(Clone)]
pub struct BatchReindexer {
    registry: Arc<IndexableRegistry>,
    index: IndexService,
    datastore: Datastore,
}

impl BatchReindexer {
    pub fn new(registry: Arc<IndexableRegistry>, index: IndexService, datastore: Datastore) -> Self {
        Self {
            registry,
            index,
            datastore,
        }
    }

    /// Rebuild the entire index for `type_name`.
    ///
    /// The delete-all is staged before any add and becomes visible at the
    /// first commit of the run, so between the first and final commits the
    /// type's documents are only partially rebuilt. A datastore failure
    /// aborts the run and leaves whatever earlier batches committed; the
    /// repair path is invoking `reindex` again.
    pub async fn reindex(
        &self,
        type_name: &str,
        options: ReindexOptions,
    ) -> Result<ReindexReport, SyncError> {
        let ty = self
            .registry
            .get(type_name)
            .cloned()
            .ok_or_else(|| SyncError::NotRegistered(type_name.to_string()))?;

        self.index
            .stage_delete_all(type_name)
            .await
            .map_err(|source| SyncError::staging(type_name, source))?;

        let total = self
            .datastore
            .count(type_name)
            .await
            .map_err(|source| SyncError::fetch(type_name, source))?;
        let include = options
            .include
            .unwrap_or_else(|| ty.default_include.clone());

        tracing::info!(
            "reindexing {}: {} records (batch size {:?})",
            type_name,
            total,
            options.batch_size
        );

        let mut report = ReindexReport {
            total,
            ..ReindexReport::default()
        };
        let mut cursor: RecordId = 0;

        if total > 0 {
            loop {
                let page = self
                    .datastore
                    .fetch_page(PageRequest {
                        type_name: type_name.to_string(),
                        after: cursor,
                        limit: options.batch_size,
                        order_by: ty.primary_key.clone(),
                        include: include.clone(),
                    })
                    .await
                    .map_err(|source| SyncError::fetch(type_name, source))?;

                if page.is_empty() {
                    break;
                }

                for record in &page {
                    self.index
                        .stage_add(type_name, record.id(), ty.snapshot(record))
                        .await
                        .map_err(|source| SyncError::staging(type_name, source))?;
                    cursor = cursor.max(record.id());
                }
                report.staged += page.len();
                report.batches += 1;
                tracing::debug!(
                    "staged batch of {} for {} (cursor {})",
                    page.len(),
                    type_name,
                    cursor
                );

                if options.batch_commit {
                    self.index.commit().await.map_err(SyncError::Commit)?;
                    report.commits += 1;
                }

                if options.batch_size.is_none() {
                    // unbounded mode is a single fetch-and-stage pass
                    break;
                }
            }
        }

        if report.commits == 0 {
            // covers batch_commit = false, and the empty dataset where the
            // delete-all still needs a terminal commit
            self.index.commit().await.map_err(SyncError::Commit)?;
            report.commits += 1;
        }

        tracing::info!(
            "reindex of {} complete: {} staged in {} batches, {} commits",
            type_name,
            report.staged,
            report.batches,
            report.commits
        );
        Ok(report)
    }
}
