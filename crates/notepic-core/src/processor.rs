//! Per-note processing
//!
//! Reads one note, checks its `filetype` against the requested type and
//! makes sure `pic` holds a useful image reference before writing the note
//! back with a regenerated frontmatter block.
//!
//! `pic` is only touched when it is missing or still holds the placeholder:
//!
//! | current `pic`     | link in body | result           |
//! |-------------------|--------------|------------------|
//! | missing           | found        | link             |
//! | missing           | none         | placeholder      |
//! | placeholder       | found        | link             |
//! | placeholder       | none         | placeholder      |
//! | anything else     | any          | unchanged        |

use std::path::Path;
use std::sync::Arc;

use serde_yaml::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frontmatter::FrontmatterCodec;
use crate::image_link::ImageLinkFinder;
use crate::writer::FileWriter;

/// Placeholder image used when a note has no image of its own
pub const DEFAULT_IMAGE_URL: &str = "https://encrypted-tbn2.gstatic.com/shopping?q=tbn:ANd9GcS71yfHYfcINhCdWC_V6hy6tSK-UqwHi2GbC1TKTXHRGsoJEuyC9rfjc11Nj6J2jIcqf07qnF6Lpp973qeWH8j5I2GCtHpd1rRBXegWkCIm4AcYDGGCAkEmfQ";

/// Frontmatter key gating which notes are processed
pub const FILETYPE_KEY: &str = "filetype";

/// Frontmatter key holding the image reference
pub const PIC_KEY: &str = "pic";

/// What happened to a single note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// `filetype` missing or different; the file was not touched
    Skipped,
    /// The note was written back
    Rewritten {
        /// Whether `pic` differs from what the note held before
        pic_updated: bool,
    },
}

/// Processes a single note file.
pub trait FileProcessor: Send + Sync {
    fn process(&self, path: &Path, file_type: &str) -> Result<ProcessOutcome>;
}

/// Processor for markdown notes with YAML frontmatter
pub struct MarkdownFileProcessor {
    codec: Arc<dyn FrontmatterCodec>,
    finder: Arc<dyn ImageLinkFinder>,
    writer: Arc<dyn FileWriter>,
    default_pic: String,
}

impl MarkdownFileProcessor {
    pub fn new(
        codec: Arc<dyn FrontmatterCodec>,
        finder: Arc<dyn ImageLinkFinder>,
        writer: Arc<dyn FileWriter>,
    ) -> Self {
        Self {
            codec,
            finder,
            writer,
            default_pic: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    /// Replace the placeholder image reference
    pub fn with_default_pic(mut self, default_pic: impl Into<String>) -> Self {
        self.default_pic = default_pic.into();
        self
    }

    pub fn default_pic(&self) -> &str {
        &self.default_pic
    }
}

impl FileProcessor for MarkdownFileProcessor {
    fn process(&self, path: &Path, file_type: &str) -> Result<ProcessOutcome> {
        debug!(file = %path.display(), "Processing file");

        let content = std::fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (mut frontmatter, body) = self.codec.extract(&content);

        match frontmatter.get(FILETYPE_KEY) {
            Some(Value::String(ft)) if ft == file_type => {}
            other => {
                trace!(
                    file = %path.display(),
                    filetype = ?other,
                    "Skipping file with different filetype"
                );
                return Ok(ProcessOutcome::Skipped);
            }
        }

        let previous = frontmatter.get(PIC_KEY).cloned();
        let (needs_update, has_pic) = match &previous {
            Some(Value::String(pic)) => (*pic == self.default_pic, true),
            _ => (true, false),
        };

        if needs_update {
            let link = self.finder.find(body);
            if !link.is_empty() {
                debug!(file = %path.display(), pic = %link, "Updated pic in frontmatter");
                frontmatter.insert(PIC_KEY.into(), Value::String(link));
            } else if !has_pic {
                debug!(file = %path.display(), pic = %self.default_pic, "Set default pic in frontmatter");
                frontmatter.insert(PIC_KEY.into(), Value::String(self.default_pic.clone()));
            }
        }

        let pic_updated = frontmatter.get(PIC_KEY) != previous.as_ref();

        let updated = self.codec.serialize(&frontmatter, body)?;
        self.writer.write_file(path, &updated)?;

        debug!(file = %path.display(), "File processed successfully");
        Ok(ProcessOutcome::Rewritten { pic_updated })
    }
}
