//! Nested localization document.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{LocalizeError, LookupError};

/// Three or more consecutive newlines.
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid blank run regex"));

/// Read-only tree of string-keyed groups and text leaves.
#[derive(Debug)]
pub(crate) struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Parse a JSON object.
    pub(crate) fn parse(origin: &str, content: &[u8]) -> Result<Self, LocalizeError> {
        let root = serde_json::from_slice(content).map_err(|source| {
            LocalizeError::MalformedDocument {
                origin: origin.to_owned(),
                source,
            }
        })?;
        Ok(Self { root })
    }

    /// Number of top-level keys.
    pub(crate) fn len(&self) -> usize {
        self.root.len()
    }

    /// Walk a dot-separated path to its text leaf.
    pub(crate) fn leaf(&self, path: &str) -> Result<&str, LookupError> {
        if path.is_empty() {
            return Err(LookupError::EmptyPath);
        }

        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return Err(LookupError::EmptyPath);
        };

        let mut current = &self.root;
        for (i, segment) in parents.iter().enumerate() {
            current = match current.get(*segment) {
                Some(Value::Object(group)) => group,
                Some(_) => {
                    return Err(LookupError::NotABranch {
                        key: segments[..=i].join("."),
                    });
                }
                None => {
                    return Err(LookupError::MissingKey {
                        key: segments[..=i].join("."),
                    });
                }
            };
        }

        match current.get(*last) {
            Some(Value::String(text)) => Ok(text),
            Some(_) => Err(LookupError::NotALeaf {
                key: path.to_owned(),
            }),
            None => Err(LookupError::MissingKey {
                key: path.to_owned(),
            }),
        }
    }
}

/// Normalize a leaf for display.
///
/// Literal `\n` sequences become newlines, the result is trimmed, and runs of
/// three or more newlines collapse to two.
pub(crate) fn clean_text(text: &str) -> String {
    let text = text.replace("\\n", "\n");
    BLANK_RUN.replace_all(text.trim(), "\n\n").into_owned()
}
