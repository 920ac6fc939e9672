//! Persistence contracts
//!
//! The engine never talks to the hosted database directly. Hosts inject an
//! implementation of [`TransactionStore`]; every grid mutation goes through
//! it first and merges into local state only when the call succeeds, so
//! local rows stay a cache of remote truth.
//!
//! [`MemoryStore`] is an in-process implementation with failure injection,
//! used by the tests and the runnable example.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use thiserror::Error;

use crate::batch::{BatchStatus, BatchStatusSource};
use crate::transaction::{Field, FieldUpdates, Transaction, Value};

/// Errors surfaced by a persistence collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected the request
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    /// A referenced record does not exist
    #[error("record not found: {0}")]
    NotFound(String),

    /// The request never reached the backend
    #[error("transport error: {0}")]
    Transport(String),
}

/// Injected persistence contract for transaction mutations
#[allow(async_fn_in_trait)]
pub trait TransactionStore {
    /// Persist a single-cell change
    async fn update(&self, id: &str, field: Field, value: Value) -> Result<(), StoreError>;

    /// Persist one set of field updates across many rows
    async fn update_many(&self, ids: &[String], updates: &FieldUpdates) -> Result<(), StoreError>;

    /// Delete rows
    async fn delete_many(&self, ids: &[String]) -> Result<(), StoreError>;

    /// Fetch the rows produced by a completed upload batch
    async fn fetch_batch(&self, batch_id: &str) -> Result<Vec<Transaction>, StoreError>;
}

/// In-memory store with scripted failures, for tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Transaction>>,
    batches: Mutex<HashMap<String, Vec<Transaction>>>,
    statuses: Mutex<VecDeque<BatchStatus>>,
    fail_next: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with records
    pub fn with_records(records: impl IntoIterator<Item = Transaction>) -> Self {
        let store = Self::new();
        store.seed(records);
        store
    }

    /// Insert or replace records
    pub fn seed(&self, records: impl IntoIterator<Item = Transaction>) {
        let mut map = self.records.lock().unwrap_or_else(|e| e.into_inner());
        for record in records {
            map.insert(record.transaction_id.clone(), record);
        }
    }

    /// Register the rows a batch will yield once completed
    pub fn seed_batch(&self, batch_id: impl Into<String>, rows: Vec<Transaction>) {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(batch_id.into(), rows);
    }

    /// Queue the statuses the poller will observe, in order; the last one
    /// repeats once the queue drains
    pub fn script_statuses(&self, statuses: impl IntoIterator<Item = BatchStatus>) {
        let mut queue = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
        queue.clear();
        queue.extend(statuses);
    }

    /// Make the next store call fail with the given error
    pub fn fail_next(&self, error: StoreError) {
        *self.fail_next.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    /// Look up a record by id
    pub fn record(&self, id: &str) -> Option<Transaction> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take_failure(&self) -> Option<StoreError> {
        self.fail_next
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

impl TransactionStore for MemoryStore {
    async fn update(&self, id: &str, field: Field, value: Value) -> Result<(), StoreError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.set_value(field, value);
        Ok(())
    }

    async fn update_many(&self, ids: &[String], updates: &FieldUpdates) -> Result<(), StoreError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        for id in ids {
            let record = records
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            record.merge(updates);
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[String]) -> Result<(), StoreError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        for id in ids {
            records.remove(id);
        }
        Ok(())
    }

    async fn fetch_batch(&self, batch_id: &str) -> Result<Vec<Transaction>, StoreError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(batch_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(batch_id.to_string()))
    }
}

impl BatchStatusSource for MemoryStore {
    fn batch_status(
        &self,
        batch_id: &str,
    ) -> impl std::future::Future<Output = Result<BatchStatus, StoreError>> + Send {
        let result = (|| {
            if let Some(error) = self.take_failure() {
                return Err(error);
            }
            let mut queue = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
            match queue.len() {
                0 => Ok(BatchStatus::pending(batch_id)),
                1 => Ok(queue[0].clone()),
                _ => Ok(queue.pop_front().unwrap_or_else(|| BatchStatus::pending(batch_id))),
            }
        })();
        std::future::ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_injection_is_one_shot() {
        let store = MemoryStore::with_records([Transaction::new("t-1")]);
        store.fail_next(StoreError::Transport("connection reset".to_string()));

        let first = store
            .update(
                "t-1",
                Field::Category,
                Value::Text("Revenue".to_string()),
            )
            .await;
        assert!(first.is_err());

        let second = store
            .update(
                "t-1",
                Field::Category,
                Value::Text("Revenue".to_string()),
            )
            .await;
        assert!(second.is_ok());
        assert_eq!(
            store.record("t-1").and_then(|r| r.category),
            Some("Revenue".to_string())
        );
    }
}
