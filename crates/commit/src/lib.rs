//! `stocktake-commit` — the commit gate and the outbound stock writer port.
//!
//! A reviewed batch of adjustments waits here for explicit confirmation
//! before anything leaves the process. A failed apply keeps the batch in
//! memory so it can be retried without re-uploading.

pub mod gate;
pub mod writer;

pub use gate::{CommitError, CommitOutcome, Confirmation, GateState, PendingCommit};
pub use writer::{CommitReceipt, InMemoryStockWriter, StockWriteError, StockWriter};
