//! Error types for note processing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while processing a single note or walking a tree.
///
/// None of these abort a run: the walker logs them and moves on to the
/// next entry.
#[derive(Error, Debug)]
pub enum Error {
    /// The note could not be read.
    #[error("read failure for {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rewritten note could not be written back.
    #[error("write failure for {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The frontmatter mapping could not be serialized again.
    #[error("frontmatter serialization failed: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// A directory entry could not be accessed during the walk.
    #[error("error accessing path {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },
}

/// Result type for note processing operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Walk {
            path: err.path().map(|p| p.to_path_buf()).unwrap_or_default(),
            message: err.to_string(),
        }
    }
}
