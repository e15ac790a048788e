//! Inventory item record.

use serde::{Deserialize, Serialize};

use stocktake_core::{DomainError, DomainResult, ItemCode, Quantity};

/// Which catalog a stock-tracked item belongs to.
///
/// The category decides template column layout and which catalog endpoint a
/// source reads from; reconciliation itself is category-agnostic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    RawMaterial,
    FinishedGood,
}

impl ItemCategory {
    /// Label used in generated filenames.
    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::RawMaterial => "raw_materials",
            ItemCategory::FinishedGood => "finished_goods",
        }
    }
}

/// One item as recorded by the inventory store.
///
/// Read-only to the pipeline: reconciliation reads snapshots of these and
/// proposes adjustments, it never mutates them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    code: ItemCode,
    name: String,
    quantity: Quantity,
    unit: String,
    min_level: Option<Quantity>,
    max_level: Option<Quantity>,
    sku: Option<String>,
}

impl InventoryItem {
    pub fn new(
        code: ItemCode,
        name: impl Into<String>,
        quantity: Quantity,
        unit: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let unit = unit.into();
        if unit.trim().is_empty() {
            return Err(DomainError::validation("unit cannot be empty"));
        }
        Ok(Self {
            code,
            name,
            quantity,
            unit,
            min_level: None,
            max_level: None,
            sku: None,
        })
    }

    /// Stock level below which a requested quantity is flagged.
    pub fn with_min_level(mut self, min_level: Quantity) -> Self {
        self.min_level = Some(min_level);
        self
    }

    /// Stock level above which a requested quantity is flagged.
    pub fn with_max_level(mut self, max_level: Quantity) -> Self {
        self.max_level = Some(max_level);
        self
    }

    /// Sales SKU; carried by finished goods only.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn code(&self) -> &ItemCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn min_level(&self) -> Option<Quantity> {
        self.min_level
    }

    pub fn max_level(&self) -> Option<Quantity> {
        self.max_level
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }
}
