//! Persisting rewritten notes

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Writes the final bytes of a note back to disk.
pub trait FileWriter: Send + Sync {
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()>;
}

/// Overwrites the note in place. Existing permissions are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFileWriter;

impl MarkdownFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl FileWriter for MarkdownFileWriter {
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        std::fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Logs what would be written and leaves the file alone
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunWriter;

impl FileWriter for DryRunWriter {
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        info!(file = %path.display(), bytes = content.len(), "Dry run, not writing");
        Ok(())
    }
}
