//! Error types for localization documents.

use std::path::PathBuf;

/// Failure to build a [`Localizer`](crate::Localizer).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LocalizeError {
    /// The document could not be read.
    #[error("localization document not readable: {}", path.display())]
    FileNotReadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The content is not a JSON object of nested keys.
    #[error("malformed localization document {origin}: {source}")]
    MalformedDocument {
        /// Where the content came from (usually a file path).
        origin: String,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Why a dot-separated path did not resolve to a text value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The path was empty.
    #[error("empty localization path")]
    EmptyPath,

    /// A key along the path does not exist.
    #[error("no entry at `{key}`")]
    MissingKey {
        /// Path prefix up to the missing key.
        key: String,
    },

    /// An intermediate key holds a value rather than a nested group.
    #[error("`{key}` is not a nested group")]
    NotABranch {
        /// Path prefix up to the offending key.
        key: String,
    },

    /// The final key holds a nested group or non-text value.
    #[error("`{key}` is not a text value")]
    NotALeaf {
        /// Full path.
        key: String,
    },
}
