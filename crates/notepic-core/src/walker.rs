//! Directory traversal
//!
//! Walks a tree depth first, prunes directories whose path contains an
//! ignore fragment, and hands every file with a wanted extension to a
//! [`FileProcessor`]. Errors on single entries or files are logged and
//! counted; the walk always runs to completion.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::error::Error;
use crate::processor::{FileProcessor, ProcessOutcome};

/// Counters for a finished walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Files whose extension matched
    pub matched: usize,
    /// Notes written back
    pub rewritten: usize,
    /// Notes whose `pic` changed
    pub pic_updated: usize,
    /// Notes left alone because of their filetype
    pub skipped: usize,
    /// Notes that failed to read, serialize or write
    pub failed: usize,
    /// Directory entries that could not be accessed
    pub access_errors: usize,
}

impl WalkSummary {
    fn record(&mut self, outcome: ProcessOutcome) {
        match outcome {
            ProcessOutcome::Skipped => self.skipped += 1,
            ProcessOutcome::Rewritten { pic_updated } => {
                self.rewritten += 1;
                if pic_updated {
                    self.pic_updated += 1;
                }
            }
        }
    }
}

/// Traverses a directory tree and processes matching notes.
pub trait DirectoryWalker: Send + Sync {
    fn walk(
        &self,
        basedir: &Path,
        extensions: &[String],
        ignore_paths: &[String],
        file_type: &str,
    ) -> WalkSummary;
}

/// Walker over the local file system
pub struct FileSystemWalker {
    processor: Arc<dyn FileProcessor>,
}

impl FileSystemWalker {
    pub fn new(processor: Arc<dyn FileProcessor>) -> Self {
        Self { processor }
    }
}

impl DirectoryWalker for FileSystemWalker {
    fn walk(
        &self,
        basedir: &Path,
        extensions: &[String],
        ignore_paths: &[String],
        file_type: &str,
    ) -> WalkSummary {
        let ignore_paths: Vec<String> = ignore_paths.iter().map(|p| p.to_lowercase()).collect();
        let mut summary = WalkSummary::default();

        let entries = WalkDir::new(basedir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir() && should_ignore_dir(e.path(), &ignore_paths))
            });

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let err = Error::from(e);
                    warn!("{}", err);
                    summary.access_errors += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() || !has_extension(entry.path(), extensions) {
                continue;
            }

            summary.matched += 1;
            match self.processor.process(entry.path(), file_type) {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    error!(file = %entry.path().display(), "Error processing file: {}", e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Walk of {} finished: {} matched, {} rewritten, {} skipped, {} failed",
            basedir.display(),
            summary.matched,
            summary.rewritten,
            summary.skipped,
            summary.failed
        );

        summary
    }
}

/// Case-insensitive substring check of the full directory path.
/// `ignore_paths` must already be lowercase.
fn should_ignore_dir(path: &Path, ignore_paths: &[String]) -> bool {
    let lowercase_path = path.to_string_lossy().to_lowercase();
    ignore_paths
        .iter()
        .filter(|fragment| !fragment.is_empty())
        .any(|fragment| lowercase_path.contains(fragment.as_str()))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
