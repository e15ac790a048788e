//! Column vocabulary shared by template rendering and upload parsing.

use stocktake_inventory::ItemCategory;

pub const ID: &str = "ID";
pub const SKU: &str = "SKU";
pub const NAME: &str = "Name";
pub const CURRENT_STOCK: &str = "Current Stock";
pub const UNIT: &str = "Unit";
pub const MIN_LEVEL: &str = "Min Level";
pub const MAX_LEVEL: &str = "Max Level";
pub const NEW_STOCK: &str = "New Stock";

/// Header row for a generated template.
pub fn header(category: ItemCategory) -> Vec<&'static str> {
    match category {
        ItemCategory::RawMaterial => {
            vec![ID, NAME, CURRENT_STOCK, UNIT, MIN_LEVEL, MAX_LEVEL, NEW_STOCK]
        }
        ItemCategory::FinishedGood => {
            vec![ID, SKU, NAME, CURRENT_STOCK, UNIT, MIN_LEVEL, MAX_LEVEL, NEW_STOCK]
        }
    }
}

/// Locate a column by case-insensitive substring match.
///
/// `"New Stock"` matches a header cell named `new stock` as well as
/// `Requested New Stock`; the first matching cell wins. Exports that rename
/// their columns entirely still fail, but capitalization and decoration
/// survive the round trip through a spreadsheet.
pub fn find(headers: &[String], wanted: &str) -> Option<usize> {
    let wanted = wanted.to_lowercase();
    headers
        .iter()
        .position(|cell| cell.to_lowercase().contains(&wanted))
}
