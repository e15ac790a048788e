//! Stock count template rendering.

use chrono::{NaiveDate, Utc};

use stocktake_core::Quantity;
use stocktake_inventory::{InventoryItem, ItemCategory};

use crate::columns;

/// A rendered stock count template plus its suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockTemplate {
    pub filename: String,
    pub contents: String,
}

/// Render a template for `items`, dated today.
///
/// "New Stock" is pre-filled with the current quantity so an untouched row
/// reconciles to a zero delta.
pub fn render(items: &[InventoryItem], category: ItemCategory) -> StockTemplate {
    render_dated(items, category, Utc::now().date_naive())
}

/// Render a template with an explicit date in the suggested filename.
pub fn render_dated(
    items: &[InventoryItem],
    category: ItemCategory,
    date: NaiveDate,
) -> StockTemplate {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(columns::header(category).join(","));
    for item in items {
        lines.push(render_row(item, category));
    }

    let mut contents = lines.join("\n");
    contents.push('\n');

    let filename = format!(
        "stock_template_{}_{}.csv",
        category.label(),
        date.format("%Y-%m-%d")
    );

    StockTemplate { filename, contents }
}

// Fields are joined bare: generated values never contain commas, and the
// ingest side splits naively.
fn render_row(item: &InventoryItem, category: ItemCategory) -> String {
    let mut fields = Vec::with_capacity(8);
    fields.push(item.code().to_string());
    if category == ItemCategory::FinishedGood {
        fields.push(item.sku().unwrap_or_default().to_string());
    }
    fields.push(item.name().to_string());
    fields.push(item.quantity().to_string());
    fields.push(item.unit().to_string());
    fields.push(level_cell(item.min_level()));
    fields.push(level_cell(item.max_level()));
    fields.push(item.quantity().to_string());
    fields.join(",")
}

fn level_cell(level: Option<Quantity>) -> String {
    level.map(|q| q.to_string()).unwrap_or_default()
}
