//! Document sinks
//!
//! Where finished export documents are saved, and how their filenames are
//! derived from the exported collection.

use crate::core::traits::DocumentSink;
use crate::types::ExportError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Filename for an exported collection
///
/// `archived_tasks_<collection>.csv`, with path separators in the
/// collection id replaced by `_` so the name always stays a single path
/// component.
pub fn document_filename(collection: &str) -> String {
    let safe: String = collection
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("archived_tasks_{}.csv", safe)
}

/// Sink that writes documents into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path a document with `filename` is written to
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

#[async_trait]
impl DocumentSink for DirectorySink {
    async fn save(&self, bytes: &[u8], filename: &str) -> Result<(), ExportError> {
        let is_dir = tokio::fs::metadata(&self.dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(ExportError::IoError {
                message: format!("Directory does not exist: {}", self.dir.display()),
            });
        }

        let path = self.path_for(filename);
        tokio::fs::write(&path, bytes).await?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
