//! Point-in-time catalog snapshot.

use std::collections::HashMap;

use stocktake_core::ItemCode;

use crate::item::InventoryItem;

/// The known-items catalog as of one moment, indexed by item code.
///
/// Supplied by the caller before parsing an upload; the pipeline never
/// fetches on its own. When the same code appears more than once in the
/// input collection, the first occurrence wins lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySnapshot {
    items: Vec<InventoryItem>,
    index: HashMap<ItemCode, usize>,
}

impl InventorySnapshot {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            index.entry(item.code().clone()).or_insert(pos);
        }
        Self { items, index }
    }

    /// Look up an item by exact code.
    pub fn get(&self, code: &str) -> Option<&InventoryItem> {
        self.index.get(code).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
