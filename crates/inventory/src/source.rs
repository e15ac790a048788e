//! Catalog source port.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use stocktake_core::DomainError;

use crate::item::{InventoryItem, ItemCategory};
use crate::snapshot::InventorySnapshot;

/// Failure while obtaining the known-items catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The catalog endpoint could not be reached or answered non-success.
    #[error("catalog request failed: {0}")]
    Transport(String),

    /// The catalog answered with data that does not decode.
    #[error("catalog returned malformed data: {0}")]
    Decode(String),

    /// The catalog answered with values the domain rejects.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Read-side port for fetching the known-items catalog.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch(&self, category: ItemCategory) -> Result<InventorySnapshot, SourceError>;
}

#[async_trait]
impl<S> ItemSource for Arc<S>
where
    S: ItemSource + ?Sized,
{
    async fn fetch(&self, category: ItemCategory) -> Result<InventorySnapshot, SourceError> {
        (**self).fetch(category).await
    }
}

/// In-memory catalog source for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryItemSource {
    catalogs: RwLock<HashMap<ItemCategory, Vec<InventoryItem>>>,
}

impl InMemoryItemSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog served for `category`.
    pub fn put(&self, category: ItemCategory, items: Vec<InventoryItem>) {
        if let Ok(mut map) = self.catalogs.write() {
            map.insert(category, items);
        }
    }
}

#[async_trait]
impl ItemSource for InMemoryItemSource {
    async fn fetch(&self, category: ItemCategory) -> Result<InventorySnapshot, SourceError> {
        let items = match self.catalogs.read() {
            Ok(map) => map.get(&category).cloned().unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        Ok(InventorySnapshot::new(items))
    }
}
