//! # notepic core
//!
//! Fills the `pic` frontmatter field of markdown notes.
//!
//! ```text
//! Processor -> FileSystemWalker -> MarkdownFileProcessor
//!                                    ├─ YamlFrontmatterCodec (extract / serialize)
//!                                    ├─ RegexImageLinkFinder
//!                                    └─ MarkdownFileWriter
//! ```
//!
//! Every collaborator sits behind a trait so it can be swapped in tests.
//! Processing is strictly sequential, one file at a time in walk order.

mod error;
pub mod frontmatter;
pub mod image_link;
pub mod orchestrator;
pub mod processor;
pub mod walker;
pub mod writer;

pub use error::{Error, Result};
pub use frontmatter::{Frontmatter, FrontmatterCodec, YamlFrontmatterCodec};
pub use image_link::{ImageLinkFinder, RegexImageLinkFinder};
pub use orchestrator::{ProcessOptions, Processor};
pub use processor::{FileProcessor, MarkdownFileProcessor, ProcessOutcome, DEFAULT_IMAGE_URL};
pub use walker::{DirectoryWalker, FileSystemWalker, WalkSummary};
pub use writer::{DryRunWriter, FileWriter, MarkdownFileWriter};
