//! Commit gate: holds a reviewed batch until explicit confirmation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stocktake_core::UploadId;
use stocktake_reconcile::StockAdjustment;

use crate::writer::{CommitReceipt, StockWriteError, StockWriter};

/// Lifecycle position of one reviewed batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    AwaitingConfirmation,
    Committed,
    Cancelled,
}

/// The reviewer's verdict.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Approved,
    Declined,
}

/// Gate misuse or a forwarded writer failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("nothing to commit: the batch is empty")]
    EmptyBatch,

    #[error("this batch was already resolved")]
    AlreadyResolved,

    #[error(transparent)]
    Write(#[from] StockWriteError),
}

/// How a resolved batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(CommitReceipt),
    Cancelled,
}

/// A reviewed batch waiting for confirmation.
///
/// Warned rows are part of the batch like any other: the pipeline surfaces
/// warnings, it never drops rows over them. After a failed apply the batch
/// stays in place so the caller can retry without re-uploading; after a
/// success or a decline the gate refuses further submits.
#[derive(Debug)]
pub struct PendingCommit {
    upload_id: UploadId,
    adjustments: Vec<StockAdjustment>,
    state: GateState,
}

impl PendingCommit {
    pub fn new(adjustments: Vec<StockAdjustment>) -> Result<Self, CommitError> {
        if adjustments.is_empty() {
            return Err(CommitError::EmptyBatch);
        }
        Ok(Self {
            upload_id: UploadId::new(),
            adjustments,
            state: GateState::AwaitingConfirmation,
        })
    }

    pub fn upload_id(&self) -> UploadId {
        self.upload_id
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn adjustments(&self) -> &[StockAdjustment] {
        &self.adjustments
    }

    pub fn warning_count(&self) -> usize {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.warning.is_some())
            .count()
    }

    /// Resolve the batch with the reviewer's verdict.
    ///
    /// Approval forwards the full batch to `writer` as one unit of work. On
    /// writer failure the gate stays `AwaitingConfirmation` and the batch is
    /// kept; callers may resolve again without re-uploading.
    pub async fn resolve<W>(
        &mut self,
        confirmation: Confirmation,
        writer: &W,
    ) -> Result<CommitOutcome, CommitError>
    where
        W: StockWriter + ?Sized,
    {
        if self.state != GateState::AwaitingConfirmation {
            return Err(CommitError::AlreadyResolved);
        }

        match confirmation {
            Confirmation::Declined => {
                self.state = GateState::Cancelled;
                self.adjustments.clear();
                tracing::info!(upload_id = %self.upload_id, "stock update cancelled");
                Ok(CommitOutcome::Cancelled)
            }
            Confirmation::Approved => match writer.apply_updates(&self.adjustments).await {
                Ok(receipt) => {
                    self.state = GateState::Committed;
                    tracing::info!(
                        upload_id = %self.upload_id,
                        applied = receipt.applied,
                        "stock update committed"
                    );
                    Ok(CommitOutcome::Committed(receipt))
                }
                Err(error) => {
                    tracing::warn!(
                        upload_id = %self.upload_id,
                        %error,
                        "stock update failed; batch kept for retry"
                    );
                    Err(CommitError::Write(error))
                }
            },
        }
    }
}
