use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// A schema-less record. Only the `id` field carries meaning to the service.
pub type Record = Map<String, Value>;

/// Whether `record` is identified by `id`. Numeric equality: `3` and `3.0` both
/// match id 3. Strings, fractional numbers and missing ids never match.
pub fn has_id(record: &Record, id: i64) -> bool {
    match record.get("id") {
        Some(v) if v.is_f64() => v.as_f64() == Some(id as f64),
        Some(v) => v.as_i64() == Some(id),
        None => false,
    }
}

/// Trait abstraction for record storage.
/// Handlers depend on this so the backing store can be swapped in tests.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn list(&self) -> Vec<Record>;
    async fn get(&self, id: i64) -> Result<Record, ServiceError>;
    async fn create(&self, record: Record) -> Record;
    async fn update(&self, id: i64, patch: Record) -> Result<Record, ServiceError>;
    /// Removes every record with the given id and returns how many were dropped.
    async fn delete(&self, id: i64) -> usize;
}
