//! `stocktake-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod code;
pub mod error;
pub mod id;
pub mod quantity;

pub use code::ItemCode;
pub use error::{DomainError, DomainResult};
pub use id::UploadId;
pub use quantity::Quantity;
