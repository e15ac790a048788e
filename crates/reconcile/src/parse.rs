//! Upload ingestion: raw CSV text to structured rows.

use thiserror::Error;

use stocktake_core::{ItemCode, Quantity};
use stocktake_inventory::InventorySnapshot;

use crate::columns;

/// Fatal upload failure. Nothing is salvaged; the caller re-uploads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than two non-blank lines: no header, or a header with no data.
    #[error("the file is empty or contains no data rows")]
    EmptyFile,

    /// Required columns absent from the header row, every missing name listed.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One data row that could not be mapped. Reported, never fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Row {row}: {kind}")]
pub struct RowError {
    /// Spreadsheet-style row number: the header is row 1.
    pub row: usize,
    pub kind: RowErrorKind,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    /// "New Stock" did not parse as a non-negative finite number.
    #[error("invalid stock quantity \"{raw}\"")]
    InvalidQuantity { raw: String },

    /// The ID is not present in the snapshot the upload was checked against.
    #[error("item with ID \"{code}\" not found")]
    UnknownItem { code: String },
}

impl RowError {
    pub fn invalid_quantity(row: usize, raw: impl Into<String>) -> Self {
        Self {
            row,
            kind: RowErrorKind::InvalidQuantity { raw: raw.into() },
        }
    }

    pub fn unknown_item(row: usize, code: impl Into<String>) -> Self {
        Self {
            row,
            kind: RowErrorKind::UnknownItem { code: code.into() },
        }
    }
}

/// One successfully mapped upload row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub code: ItemCode,
    pub requested: Quantity,
}

/// Everything the parser extracted from one upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub rows: Vec<ParsedRow>,
    pub row_errors: Vec<RowError>,
}

/// Parse one uploaded stock count against the catalog snapshot.
///
/// Fatal problems (no data, required columns missing) fail the whole call.
/// Per-row problems are collected into `row_errors` and never abort the
/// batch: one malformed row must not block the rest of the file. Rows whose
/// ID or "New Stock" cell is blank are skipped without comment; a template
/// comes back with most rows untouched and those are not errors.
pub fn parse_upload(
    contents: &str,
    snapshot: &InventorySnapshot,
) -> Result<ParseOutcome, ParseError> {
    let lines: Vec<&str> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(ParseError::EmptyFile);
    }

    let headers = split_fields(lines[0]);
    let (id_col, stock_col) = match (
        columns::find(&headers, columns::ID),
        columns::find(&headers, columns::NEW_STOCK),
    ) {
        (Some(id_col), Some(stock_col)) => (id_col, stock_col),
        (id_col, stock_col) => {
            let mut missing = Vec::new();
            if id_col.is_none() {
                missing.push(columns::ID.to_string());
            }
            if stock_col.is_none() {
                missing.push(columns::NEW_STOCK.to_string());
            }
            return Err(ParseError::MissingColumns(missing));
        }
    };

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();

    // Row numbers match what a spreadsheet shows: the header is row 1 and
    // data starts at row 2, counted over non-blank lines.
    for (offset, line) in lines[1..].iter().enumerate() {
        let row = offset + 2;
        match parse_row(row, line, id_col, stock_col, snapshot) {
            Some(Ok(parsed)) => rows.push(parsed),
            Some(Err(error)) => {
                tracing::debug!(row, %error, "skipping upload row");
                row_errors.push(error);
            }
            None => {}
        }
    }

    tracing::debug!(
        rows = rows.len(),
        row_errors = row_errors.len(),
        "parsed stock upload"
    );

    Ok(ParseOutcome { rows, row_errors })
}

/// Map one data line. `None` means the row was left blank and is skipped.
fn parse_row(
    row: usize,
    line: &str,
    id_col: usize,
    stock_col: usize,
    snapshot: &InventorySnapshot,
) -> Option<Result<ParsedRow, RowError>> {
    let fields = split_fields(line);
    let id = fields.get(id_col).cloned().unwrap_or_default();
    let raw_stock = fields.get(stock_col).cloned().unwrap_or_default();

    if id.is_empty() || raw_stock.is_empty() {
        return None;
    }

    // Quantity first: a row that is wrong in both ways reports the quantity.
    let requested = match raw_stock.parse::<Quantity>() {
        Ok(quantity) => quantity,
        Err(_) => return Some(Err(RowError::invalid_quantity(row, raw_stock))),
    };

    match snapshot.get(&id) {
        Some(item) => Some(Ok(ParsedRow {
            code: item.code().clone(),
            requested,
        })),
        None => Some(Err(RowError::unknown_item(row, id))),
    }
}

/// Split one line on commas, trimming whitespace and one surrounding pair of
/// double quotes per field. Embedded commas are not supported; the template
/// generator never emits them.
fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(clean_field).collect()
}

fn clean_field(field: &str) -> String {
    let trimmed = field.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}
