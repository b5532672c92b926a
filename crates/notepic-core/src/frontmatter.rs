//! YAML frontmatter extraction and serialization
//!
//! A note may open with a metadata block fenced by two lines that contain
//! only `---`:
//!
//! ```text
//! ---
//! filetype: recipe
//! pic: https://example.com/pie.jpg
//! ---
//! # Apple pie
//! ```
//!
//! Extraction never fails. A missing, unterminated or unparsable block
//! yields an empty mapping so callers can always index into it. The body is
//! handed back as an exact slice of the input and is never re-encoded.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::Result;

/// Delimiter line around the frontmatter block
pub const MARKER: &[u8] = b"---";

/// Parsed frontmatter. Insertion ordered, so keys keep their source order.
pub type Frontmatter = Mapping;

/// Splits a note into frontmatter and body, and renders them back.
pub trait FrontmatterCodec: Send + Sync {
    /// Separate the leading metadata block from the body
    fn extract<'a>(&self, content: &'a [u8]) -> (Frontmatter, &'a [u8]);

    /// Render `---`, the mapping, `---`, then the body verbatim
    fn serialize(&self, frontmatter: &Frontmatter, body: &[u8]) -> Result<Vec<u8>>;
}

/// Codec for `---` fenced YAML blocks
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFrontmatterCodec;

impl YamlFrontmatterCodec {
    pub fn new() -> Self {
        Self
    }
}

impl FrontmatterCodec for YamlFrontmatterCodec {
    fn extract<'a>(&self, content: &'a [u8]) -> (Frontmatter, &'a [u8]) {
        match locate_block(content) {
            Some(block) => {
                let frontmatter = parse_mapping(&content[block.yaml_start..block.yaml_end]);
                (frontmatter, &content[block.body_start..])
            }
            None => (Frontmatter::new(), content),
        }
    }

    fn serialize(&self, frontmatter: &Frontmatter, body: &[u8]) -> Result<Vec<u8>> {
        let yaml = serde_yaml::to_string(frontmatter)?;

        let mut out = Vec::with_capacity(yaml.len() + body.len() + 8);
        out.extend_from_slice(MARKER);
        out.push(b'\n');
        out.extend_from_slice(yaml.as_bytes());
        out.extend_from_slice(MARKER);
        out.push(b'\n');
        out.extend_from_slice(body);
        Ok(out)
    }
}

/// Byte offsets of a fenced block inside the note
#[derive(Debug, PartialEq, Eq)]
struct Block {
    yaml_start: usize,
    yaml_end: usize,
    body_start: usize,
}

fn is_marker(line: &[u8]) -> bool {
    line.trim_ascii() == MARKER
}

/// Find the opening marker on the first line and the next marker line after it.
fn locate_block(content: &[u8]) -> Option<Block> {
    let mut lines = content.split(|&b| b == b'\n');

    let first = lines.next()?;
    if !is_marker(first) {
        return None;
    }

    let yaml_start = first.len() + 1;
    let mut offset = yaml_start;
    for line in lines {
        if is_marker(line) {
            return Some(Block {
                yaml_start,
                yaml_end: offset,
                body_start: (offset + line.len() + 1).min(content.len()),
            });
        }
        offset += line.len() + 1;
    }

    // Opening marker without a closing one: the whole note is body
    None
}

fn parse_mapping(raw: &[u8]) -> Frontmatter {
    let Ok(text) = std::str::from_utf8(raw) else {
        debug!("Frontmatter is not valid UTF-8, ignoring it");
        return Frontmatter::new();
    };

    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => Frontmatter::new(),
        Ok(other) => {
            debug!("Frontmatter is not a mapping ({:?}), ignoring it", other);
            Frontmatter::new()
        }
        Err(e) => {
            debug!("Failed to parse frontmatter: {}", e);
            Frontmatter::new()
        }
    }
}
