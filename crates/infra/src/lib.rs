//! Infrastructure layer: HTTP collaborators, credentials, file export.

pub mod credentials;
pub mod file_export;
pub mod http_writer;
pub mod item_source;

pub use credentials::{StaticToken, TokenProvider};
pub use file_export::{DirExporter, ExportError, FileExporter};
pub use http_writer::HttpStockWriter;
pub use item_source::HttpItemSource;
