//! Embedded in-memory index backend
//!
//! Reference backend with the staging semantics of a commit-based search
//! service: operations are journaled at staging time and only become visible
//! to `list_ids` and `query` once a commit applies the journal. The
//! behavioral test suites run against this backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::IndexServiceError;
use super::traits::IndexServiceBackend;
use super::{SearchHit, SearchQuery};
use crate::record::RecordId;

/// A staged operation awaiting commit.
#[derive(Debug, Clone)]
enum StagedOp {
    Add {
        type_name: String,
        id: RecordId,
        attributes: Map<String, Value>,
    },
    Delete {
        type_name: String,
        id: RecordId,
    },
    DeleteAll {
        type_name: String,
    },
}

#[derive(Default)]
struct IndexState {
    /// Journal applied in order at commit time. Later operations for the
    /// same identifier win.
    staged: Vec<StagedOp>,
    /// Committed documents per type, keyed ascending by identifier.
    committed: HashMap<String, BTreeMap<RecordId, Map<String, Value>>>,
    commits: usize,
    fail_next_staging: Option<String>,
    fail_next_commit: Option<String>,
}

/// In-memory index service
pub struct MemoryIndexService {
    state: Mutex<IndexState>,
}

impl MemoryIndexService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(IndexState::default()),
        }
    }

    /// Number of successful commits so far.
    pub fn commit_count(&self) -> usize {
        self.state.lock().unwrap().commits
    }

    /// Number of operations currently staged.
    pub fn staged_len(&self) -> usize {
        self.state.lock().unwrap().staged.len()
    }

    /// Reject the next staging call with the given message.
    pub fn fail_next_staging(&self, msg: impl Into<String>) {
        self.state.lock().unwrap().fail_next_staging = Some(msg.into());
    }

    /// Fail the next commit with the given message. Staged operations are
    /// kept.
    pub fn fail_next_commit(&self, msg: impl Into<String>) {
        self.state.lock().unwrap().fail_next_commit = Some(msg.into());
    }
}

impl Default for MemoryIndexService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexServiceBackend for MemoryIndexService {
    async fn stage_add(
        &self,
        type_name: &str,
        id: RecordId,
        attributes: Map<String, Value>,
    ) -> Result<(), IndexServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(msg) = state.fail_next_staging.take() {
            return Err(IndexServiceError::rejected(msg));
        }
        state.staged.push(StagedOp::Add {
            type_name: type_name.to_string(),
            id,
            attributes,
        });
        Ok(())
    }

    async fn stage_delete(&self, type_name: &str, id: RecordId) -> Result<(), IndexServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(msg) = state.fail_next_staging.take() {
            return Err(IndexServiceError::rejected(msg));
        }
        state.staged.push(StagedOp::Delete {
            type_name: type_name.to_string(),
            id,
        });
        Ok(())
    }

    async fn stage_delete_all(&self, type_name: &str) -> Result<(), IndexServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(msg) = state.fail_next_staging.take() {
            return Err(IndexServiceError::rejected(msg));
        }
        state.staged.push(StagedOp::DeleteAll {
            type_name: type_name.to_string(),
        });
        Ok(())
    }

    async fn commit(&self) -> Result<(), IndexServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(msg) = state.fail_next_commit.take() {
            return Err(IndexServiceError::unavailable(msg));
        }
        let ops = std::mem::take(&mut state.staged);
        for op in ops {
            match op {
                StagedOp::Add {
                    type_name,
                    id,
                    attributes,
                } => {
                    state
                        .committed
                        .entry(type_name)
                        .or_default()
                        .insert(id, attributes);
                }
                StagedOp::Delete { type_name, id } => {
                    // absent identifiers are a no-op
                    if let Some(docs) = state.committed.get_mut(&type_name) {
                        docs.remove(&id);
                    }
                }
                StagedOp::DeleteAll { type_name } => {
                    state.committed.remove(&type_name);
                }
            }
        }
        state.commits += 1;
        Ok(())
    }

    async fn list_ids(&self, type_name: &str) -> Result<Vec<RecordId>, IndexServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .committed
            .get(type_name)
            .map(|docs| docs.keys().copied().collect())
            .unwrap_or_default())
    }

    async fn query(
        &self,
        type_name: &str,
        query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, IndexServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .committed
            .get(type_name)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, attributes)| query.matches(attributes))
                    .map(|(id, attributes)| SearchHit {
                        id: *id,
                        attributes: attributes.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
