//! Embedded in-memory datastore backend
//!
//! Per-type record tables with mutators for test setup. Every page request
//! the engine issues is logged so suites can assert the exact pagination
//! parameters sent across the boundary.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::DatastoreError;
use super::traits::DatastoreBackend;
use super::PageRequest;
use crate::record::{Record, RecordId};

#[derive(Default)]
struct StoreState {
    tables: HashMap<String, BTreeMap<RecordId, Record>>,
    page_log: Vec<PageRequest>,
    count_calls: usize,
    fail_next_fetch: Option<String>,
}

/// In-memory datastore
pub struct MemoryDatastore {
    state: Mutex<StoreState>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Insert a record, replacing any record with the same identifier.
    pub fn insert(&self, type_name: &str, record: Record) {
        self.state
            .lock()
            .unwrap()
            .tables
            .entry(type_name.to_string())
            .or_default()
            .insert(record.id(), record);
    }

    /// Delete a record, returning it if it existed.
    pub fn delete(&self, type_name: &str, id: RecordId) -> Option<Record> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get_mut(type_name)
            .and_then(|table| table.remove(&id))
    }

    /// Page requests received so far, in order.
    pub fn page_log(&self) -> Vec<PageRequest> {
        self.state.lock().unwrap().page_log.clone()
    }

    /// Number of `count` calls received so far.
    pub fn count_calls(&self) -> usize {
        self.state.lock().unwrap().count_calls
    }

    /// Fail the next `fetch_page` call with the given message.
    pub fn fail_next_fetch(&self, msg: impl Into<String>) {
        self.state.lock().unwrap().fail_next_fetch = Some(msg.into());
    }
}

impl Default for MemoryDatastore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatastoreBackend for MemoryDatastore {
    async fn count(&self, type_name: &str) -> Result<usize, DatastoreError> {
        let mut state = self.state.lock().unwrap();
        state.count_calls += 1;
        Ok(state.tables.get(type_name).map(BTreeMap::len).unwrap_or(0))
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Record>, DatastoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(msg) = state.fail_next_fetch.take() {
            return Err(DatastoreError::query(msg));
        }
        state.page_log.push(request.clone());

        let records = state
            .tables
            .get(&request.type_name)
            .map(|table| {
                // BTreeMap iteration is already ascending by primary key
                let after = (Bound::Excluded(request.after), Bound::Unbounded);
                let page = table.range(after).map(|(_, r)| r.clone());
                match request.limit {
                    Some(limit) => page.take(limit).collect(),
                    None => page.collect(),
                }
            })
            .unwrap_or_default();
        Ok(records)
    }

    async fn exists(&self, type_name: &str, id: RecordId) -> Result<bool, DatastoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tables
            .get(type_name)
            .is_some_and(|table| table.contains_key(&id)))
    }

    async fn load(&self, type_name: &str, ids: &[RecordId]) -> Result<Vec<Record>, DatastoreError> {
        let state = self.state.lock().unwrap();
        let Some(table) = state.tables.get(type_name) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| table.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(type_name: &str, after: RecordId, limit: Option<usize>) -> PageRequest {
        PageRequest {
            type_name: type_name.to_string(),
            after,
            limit,
            order_by: "id".to_string(),
            include: Vec::new(),
        }
    }

    fn seed(store: &MemoryDatastore, ids: impl IntoIterator<Item = RecordId>) {
        for id in ids {
            store.insert("posts", Record::new(id));
        }
    }

    #[tokio::test]
    async fn test_count_and_exists() {
        let store = MemoryDatastore::new();
        seed(&store, [1, 2, 3]);

        assert_eq!(store.count("posts").await.unwrap(), 3);
        assert_eq!(store.count("authors").await.unwrap(), 0);
        assert!(store.exists("posts", 2).await.unwrap());
        assert!(!store.exists("posts", 9).await.unwrap());
        assert_eq!(store.count_calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_page_cursor_and_limit() {
        let store = MemoryDatastore::new();
        seed(&store, [1, 2, 3, 4, 5]);

        let first = store.fetch_page(page("posts", 0, Some(2))).await.unwrap();
        assert_eq!(first.iter().map(Record::id).collect::<Vec<_>>(), vec![1, 2]);

        let second = store.fetch_page(page("posts", 2, Some(2))).await.unwrap();
        assert_eq!(
            second.iter().map(Record::id).collect::<Vec<_>>(),
            vec![3, 4]
        );

        let rest = store.fetch_page(page("posts", 4, Some(2))).await.unwrap();
        assert_eq!(rest.iter().map(Record::id).collect::<Vec<_>>(), vec![5]);

        let empty = store.fetch_page(page("posts", 5, Some(2))).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_page_unbounded() {
        let store = MemoryDatastore::new();
        seed(&store, [1, 2, 3]);

        let all = store.fetch_page(page("posts", 0, None)).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_page_log_records_requests() {
        let store = MemoryDatastore::new();
        seed(&store, [1]);

        let request = PageRequest {
            type_name: "posts".to_string(),
            after: 0,
            limit: Some(500),
            order_by: "id".to_string(),
            include: vec!["author".to_string()],
        };
        store.fetch_page(request.clone()).await.unwrap();

        assert_eq!(store.page_log(), vec![request]);
    }

    #[tokio::test]
    async fn test_load_preserves_order_and_skips_missing() {
        let store = MemoryDatastore::new();
        seed(&store, [1, 2, 3]);
        store.delete("posts", 2);

        let loaded = store.load("posts", &[3, 2, 1]).await.unwrap();
        assert_eq!(loaded.iter().map(Record::id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_fail_next_fetch_is_one_shot() {
        let store = MemoryDatastore::new();
        seed(&store, [1]);

        store.fail_next_fetch("connection reset");
        assert!(store.fetch_page(page("posts", 0, None)).await.is_err());
        assert!(store.fetch_page(page("posts", 0, None)).await.is_ok());
    }
}
