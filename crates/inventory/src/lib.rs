//! Inventory catalog module.
//!
//! This crate models the known-items catalog the reconciliation pipeline
//! works against: the item record, point-in-time snapshots of the catalog,
//! and the port for fetching them. Business rules stay deterministic; all
//! IO lives behind the [`ItemSource`] trait.

pub mod item;
pub mod snapshot;
pub mod source;

pub use item::{InventoryItem, ItemCategory};
pub use snapshot::InventorySnapshot;
pub use source::{InMemoryItemSource, ItemSource, SourceError};
