use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::records::{has_id, Record, RecordRepository};

/// In-memory ordered record store.
///
/// Holds the records behind a single `RwLock`; every write takes the write lock
/// for its whole duration. Contents are dropped with the process.
#[derive(Clone, Default)]
pub struct RecordStore {
    inner: Arc<RwLock<Vec<Record>>>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { inner: Arc::new(RwLock::new(records)) }
    }

    /// Store preloaded with the two sample measurements.
    pub fn seeded() -> Self {
        Self::new(sample_records())
    }

    /// List all records in insertion order.
    pub async fn list(&self) -> Vec<Record> {
        let records = self.inner.read().await;
        debug!(count = records.len(), "list records");
        records.clone()
    }

    /// First record whose `id` equals `id`.
    pub async fn get(&self, id: i64) -> Result<Record, ServiceError> {
        let records = self.inner.read().await;
        match records.iter().find(|r| has_id(r, id)) {
            Some(found) => Ok(found.clone()),
            None => {
                warn!(id, "record not found");
                Err(ServiceError::NotFound(id))
            }
        }
    }

    /// Append `record` verbatim. No id is checked or assigned.
    pub async fn create(&self, record: Record) -> Record {
        let mut records = self.inner.write().await;
        records.push(record.clone());
        info!(id = ?record.get("id"), total = records.len(), "record created");
        record
    }

    /// Shallow-merge `patch` into the first record with `id`.
    /// Keys in `patch` overwrite or extend; other keys are left alone.
    pub async fn update(&self, id: i64, patch: Record) -> Result<Record, ServiceError> {
        let mut records = self.inner.write().await;
        let existing = match records.iter_mut().find(|r| has_id(r, id)) {
            Some(r) => r,
            None => {
                warn!(id, "update target not found");
                return Err(ServiceError::NotFound(id));
            }
        };
        let fields = patch.len();
        existing.extend(patch);
        info!(id, fields, "record updated");
        Ok(existing.clone())
    }

    /// Drop every record with `id`; returns how many went.
    pub async fn delete(&self, id: i64) -> usize {
        let mut records = self.inner.write().await;
        let before = records.len();
        records.retain(|r| !has_id(r, id));
        let removed = before - records.len();
        info!(id, removed, "records deleted");
        removed
    }
}

#[async_trait]
impl RecordRepository for RecordStore {
    async fn list(&self) -> Vec<Record> {
        self.list().await
    }

    async fn get(&self, id: i64) -> Result<Record, ServiceError> {
        self.get(id).await
    }

    async fn create(&self, record: Record) -> Record {
        self.create(record).await
    }

    async fn update(&self, id: i64, patch: Record) -> Result<Record, ServiceError> {
        self.update(id, patch).await
    }

    async fn delete(&self, id: i64) -> usize {
        self.delete(id).await
    }
}

fn sample_records() -> Vec<Record> {
    [
        json!({"id": 1, "name": "Heart Rate", "value": 72}),
        json!({"id": 2, "name": "Blood Pressure", "value": "120/80"}),
    ]
    .into_iter()
    .filter_map(|v| match v {
        Value::Object(map) => Some(map),
        _ => None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(v: Value) -> Record {
        v.as_object().cloned().expect("object literal")
    }

    #[tokio::test]
    async fn seeded_store_lists_samples_in_order() {
        let store = RecordStore::seeded();
        let all = store.list().await;
        assert_eq!(all.len(), 2);
        assert_eq!(Value::Object(all[0].clone()), json!({"id": 1, "name": "Heart Rate", "value": 72}));
        assert_eq!(Value::Object(all[1].clone()), json!({"id": 2, "name": "Blood Pressure", "value": "120/80"}));
    }

    #[tokio::test]
    async fn get_returns_first_match_or_not_found() -> Result<(), anyhow::Error> {
        let store = RecordStore::new(vec![
            record(json!({"id": 5, "tag": "first"})),
            record(json!({"id": 5, "tag": "second"})),
        ]);
        let found = store.get(5).await?;
        assert_eq!(found["tag"], "first");
        assert_eq!(store.get(6).await, Err(ServiceError::NotFound(6)));
        Ok(())
    }

    #[tokio::test]
    async fn create_appends_verbatim_without_id() {
        let store = RecordStore::seeded();
        let payload = record(json!({"note": "no id here", "nested": {"a": [1, 2]}}));
        let created = store.create(payload.clone()).await;
        assert_eq!(created, payload);
        let all = store.list().await;
        assert_eq!(all.len(), 3);
        assert_eq!(all.last(), Some(&payload));
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() -> Result<(), anyhow::Error> {
        let store = RecordStore::seeded();
        let updated = store.update(1, record(json!({"value": 80, "unit": "bpm"}))).await?;
        assert_eq!(Value::Object(updated), json!({"id": 1, "name": "Heart Rate", "value": 80, "unit": "bpm"}));
        assert_eq!(store.get(1).await?["value"], 80);
        Ok(())
    }

    #[tokio::test]
    async fn update_only_touches_first_duplicate() -> Result<(), anyhow::Error> {
        let store = RecordStore::new(vec![
            record(json!({"id": 3, "value": 1})),
            record(json!({"id": 3, "value": 2})),
        ]);
        store.update(3, record(json!({"value": 9}))).await?;
        let all = store.list().await;
        assert_eq!(all[0]["value"], 9);
        assert_eq!(all[1]["value"], 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_leaves_store_unchanged() {
        let store = RecordStore::seeded();
        let before = store.list().await;
        let res = store.update(99, record(json!({"value": 1}))).await;
        assert_eq!(res, Err(ServiceError::NotFound(99)));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn delete_removes_all_duplicates_and_tolerates_misses() {
        let store = RecordStore::seeded();
        store.create(record(json!({"id": 3, "value": 1}))).await;
        store.create(record(json!({"id": 3, "value": 2}))).await;
        assert_eq!(store.delete(3).await, 2);
        assert_eq!(store.delete(3).await, 0);
        let ids: Vec<_> = store.list().await.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = RecordStore::default();
        assert_eq!(store.list().await, Vec::<Record>::new());
    }

    #[tokio::test]
    async fn float_id_is_found_updated_and_deleted() -> Result<(), anyhow::Error> {
        let store = RecordStore::seeded();
        store.create(record(json!({"id": 3.0, "value": 1}))).await;

        assert_eq!(store.get(3).await?["value"], 1);
        let updated = store.update(3, record(json!({"value": 2}))).await?;
        assert_eq!(updated["value"], 2);
        assert_eq!(store.delete(3).await, 1);
        assert_eq!(store.get(3).await, Err(ServiceError::NotFound(3)));
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = RecordStore::default();
        let handle = store.clone();
        handle.create(record(json!({"id": 1}))).await;
        assert_eq!(store.list().await.len(), 1);
    }
}
