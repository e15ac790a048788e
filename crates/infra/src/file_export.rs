//! File export port for generated templates.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Sink for generated template documents.
///
/// Rendering stays pure; whatever surface hosts the pipeline decides where
/// the bytes land.
pub trait FileExporter: Send + Sync {
    /// Write `contents` under `filename`, returning the final location.
    fn export(&self, filename: &str, contents: &str) -> Result<PathBuf, ExportError>;
}

/// Exports into a fixed directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirExporter {
    dir: PathBuf,
}

impl DirExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileExporter for DirExporter {
    fn export(&self, filename: &str, contents: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(filename);
        fs::write(&path, contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "exported file");
        Ok(path)
    }
}
