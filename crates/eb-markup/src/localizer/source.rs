//! Where localization documents come from.

use std::path::{Path, PathBuf};

use crate::error::LocalizeError;

/// Provider of raw localization document bytes.
///
/// Implementations must be `Send + Sync` so a shared localizer can be built
/// from any thread.
pub trait DocumentSource: Send + Sync {
    /// Human-readable origin used in logs and errors.
    fn origin(&self) -> String;

    /// Read the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizeError::FileNotReadable`] if the content cannot be read.
    fn read(&self) -> Result<Vec<u8>, LocalizeError>;
}

/// Document stored in a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Vec<u8>, LocalizeError> {
        std::fs::read(&self.path).map_err(|source| LocalizeError::FileNotReadable {
            path: self.path.clone(),
            source,
        })
    }
}
