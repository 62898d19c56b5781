use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A text buffer the host hands to the gate.
pub trait Document {
    /// Stable key of the buffer (normalized absolute path).
    fn identity(&self) -> &Path;

    /// Language kind, e.g. `gnuplot`.
    fn language(&self) -> &str;

    /// Current buffer content.
    fn content(&self) -> io::Result<String>;

    /// Flush pending edits to stable storage before a build.
    fn save(&self) -> io::Result<()>;
}

/// Buffer backed directly by a file on disk.
#[derive(Debug, Clone)]
pub struct FsDocument {
    path: PathBuf,
    language: String,
}

impl FsDocument {
    pub fn new(path: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
        }
    }
}

impl Document for FsDocument {
    fn identity(&self) -> &Path {
        &self.path
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn content(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// The file is the buffer, there is nothing left to flush.
    fn save(&self) -> io::Result<()> {
        Ok(())
    }
}
