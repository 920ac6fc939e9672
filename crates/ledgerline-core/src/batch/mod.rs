//! Upload batch processing
//!
//! After a statement upload the backend assigns a batch id and processes the
//! files asynchronously. This module holds the batch status model and the
//! cancellable poller that watches a batch until it completes, times out, or
//! fails.

mod poller;

pub use poller::{spawn, PollConfig, PollHandle, PollOutcome};

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Status string reported for a finished batch
pub const STATUS_SUCCESS: &str = "success";

/// Processing status of one upload batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatus {
    /// Batch identifier assigned by the upload endpoint
    pub batch_id: String,
    /// Backend status string
    pub status: String,
    /// Optional human-readable detail
    #[serde(default)]
    pub message: Option<String>,
}

impl BatchStatus {
    /// A batch still being processed
    pub fn pending(batch_id: impl Into<String>) -> Self {
        BatchStatus {
            batch_id: batch_id.into(),
            status: "processing".to_string(),
            message: None,
        }
    }

    /// A successfully completed batch
    pub fn success(batch_id: impl Into<String>) -> Self {
        BatchStatus {
            batch_id: batch_id.into(),
            status: STATUS_SUCCESS.to_string(),
            message: None,
        }
    }

    /// Whether processing finished successfully
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Collaborator the poller asks for batch status
///
/// Returned futures must be `Send`: the poller runs on a spawned task.
pub trait BatchStatusSource {
    /// Current status of a batch
    fn batch_status(
        &self,
        batch_id: &str,
    ) -> impl std::future::Future<Output = Result<BatchStatus, StoreError>> + Send;
}

impl<T: BatchStatusSource> BatchStatusSource for std::sync::Arc<T> {
    fn batch_status(
        &self,
        batch_id: &str,
    ) -> impl std::future::Future<Output = Result<BatchStatus, StoreError>> + Send {
        (**self).batch_status(batch_id)
    }
}
