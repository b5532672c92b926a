//! Wiring of the processing pipeline

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::frontmatter::YamlFrontmatterCodec;
use crate::image_link::RegexImageLinkFinder;
use crate::processor::{MarkdownFileProcessor, DEFAULT_IMAGE_URL};
use crate::walker::{DirectoryWalker, FileSystemWalker, WalkSummary};
use crate::writer::{DryRunWriter, FileWriter, MarkdownFileWriter};

/// Options for a processing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Root of the tree to scan
    pub basedir: PathBuf,
    /// File extensions to process, without the dot
    pub extensions: Vec<String>,
    /// Directory path fragments to skip (case-insensitive)
    pub ignore_paths: Vec<String>,
    /// Required value of the `filetype` frontmatter key
    pub filetype: String,
    /// Placeholder written when no image is found
    pub default_pic: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            basedir: PathBuf::from("."),
            extensions: vec!["md".to_string()],
            ignore_paths: vec![".git".to_string(), ".trash".to_string()],
            filetype: "recipe".to_string(),
            default_pic: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

/// Entry point tying the walker to the note processor
pub struct Processor {
    walker: Arc<dyn DirectoryWalker>,
}

impl Processor {
    pub fn new(walker: Arc<dyn DirectoryWalker>) -> Self {
        Self { walker }
    }

    /// Default pipeline writing notes in place
    pub fn new_default(default_pic: &str) -> Self {
        Self::with_writer(Arc::new(MarkdownFileWriter::new()), default_pic)
    }

    /// Default pipeline that never writes
    pub fn dry_run(default_pic: &str) -> Self {
        Self::with_writer(Arc::new(DryRunWriter), default_pic)
    }

    fn with_writer(writer: Arc<dyn FileWriter>, default_pic: &str) -> Self {
        let file_processor = MarkdownFileProcessor::new(
            Arc::new(YamlFrontmatterCodec::new()),
            Arc::new(RegexImageLinkFinder::new()),
            writer,
        )
        .with_default_pic(default_pic);
        let walker = FileSystemWalker::new(Arc::new(file_processor));
        Self::new(Arc::new(walker))
    }

    /// Build the pipeline described by `options`
    pub fn from_options(options: &ProcessOptions, dry_run: bool) -> Self {
        if dry_run {
            Self::dry_run(&options.default_pic)
        } else {
            Self::new_default(&options.default_pic)
        }
    }

    /// Process every matching note below `options.basedir`
    pub fn process_files(&self, options: &ProcessOptions) -> WalkSummary {
        info!(
            basedir = %options.basedir.display(),
            filetype = %options.filetype,
            "Processing notes"
        );
        self.walker.walk(
            &options.basedir,
            &options.extensions,
            &options.ignore_paths,
            &options.filetype,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let options = ProcessOptions::default();
        assert_eq!(options.basedir, PathBuf::from("."));
        assert_eq!(options.extensions, vec!["md"]);
        assert_eq!(options.ignore_paths, vec![".git", ".trash"]);
        assert_eq!(options.filetype, "recipe");
        assert_eq!(options.default_pic, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn dry_run_counts_without_writing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pie.md");
        let original = "---\nfiletype: recipe\n---\n![[pie.png]]\n";
        std::fs::write(&path, original).unwrap();

        let options = ProcessOptions {
            basedir: temp.path().to_path_buf(),
            ..Default::default()
        };
        let summary = Processor::from_options(&options, true).process_files(&options);

        assert_eq!(summary.rewritten, 1);
        assert_eq!(summary.pic_updated, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
