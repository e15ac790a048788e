//! Outbound port for applying a reviewed batch to the inventory store.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stocktake_reconcile::StockAdjustment;

/// What the inventory store reported back for one applied batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    /// Number of updates the store applied.
    pub applied: usize,
}

/// Failure applying a batch. Surfaced to the reviewer verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockWriteError {
    /// The store answered and refused the batch.
    #[error("stock update rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("stock update transport failure: {0}")]
    Transport(String),
}

/// Port to the external "apply stock updates" collaborator.
///
/// The whole batch is one unit of work: no per-row retry, no rollback, and
/// no idempotency key, so callers must not submit the same batch twice.
#[async_trait]
pub trait StockWriter: Send + Sync {
    async fn apply_updates(
        &self,
        updates: &[StockAdjustment],
    ) -> Result<CommitReceipt, StockWriteError>;
}

#[async_trait]
impl<W> StockWriter for Arc<W>
where
    W: StockWriter + ?Sized,
{
    async fn apply_updates(
        &self,
        updates: &[StockAdjustment],
    ) -> Result<CommitReceipt, StockWriteError> {
        (**self).apply_updates(updates).await
    }
}

/// In-memory writer for tests and local development: records applied
/// batches and can be primed to fail.
#[derive(Debug, Default)]
pub struct InMemoryStockWriter {
    batches: Mutex<Vec<Vec<StockAdjustment>>>,
    failures: Mutex<VecDeque<StockWriteError>>,
}

impl InMemoryStockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next `apply_updates` call.
    pub fn fail_next(&self, error: StockWriteError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back(error);
        }
    }

    /// Batches applied so far, in call order.
    pub fn batches(&self) -> Vec<Vec<StockAdjustment>> {
        self.batches.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StockWriter for InMemoryStockWriter {
    async fn apply_updates(
        &self,
        updates: &[StockAdjustment],
    ) -> Result<CommitReceipt, StockWriteError> {
        if let Ok(mut failures) = self.failures.lock() {
            if let Some(error) = failures.pop_front() {
                return Err(error);
            }
        }

        if let Ok(mut batches) = self.batches.lock() {
            batches.push(updates.to_vec());
        }

        Ok(CommitReceipt {
            applied: updates.len(),
        })
    }
}
