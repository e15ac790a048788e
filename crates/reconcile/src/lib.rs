//! `stocktake-reconcile` — the bulk stock reconciliation pipeline.
//!
//! Three stages, all pure: template rendering ([`template`]), upload parsing
//! ([`parse`]) and reconciliation ([`engine`]). Callers supply the catalog
//! snapshot and own all IO; the same snapshot must feed parsing and
//! reconciliation of one upload.

pub mod columns;
pub mod engine;
pub mod parse;
pub mod template;

pub use engine::{reconcile, ReconcilePolicy, StockAdjustment, StockWarning};
pub use parse::{parse_upload, ParseError, ParseOutcome, ParsedRow, RowError, RowErrorKind};
pub use template::StockTemplate;
