//! `@Localize[path]` placeholder resolution.
//!
//! A [`Localizer`] owns a nested JSON document loaded once and replaces every
//! `@Localize[dot.path]` placeholder with the cleaned text leaf at that path.
//! Placeholders whose path does not resolve are left exactly as written.
//!
//! # Example
//!
//! ```
//! use eb_markup::Localizer;
//!
//! let localizer = Localizer::from_json("inline", r#"{"COMBAT": {"Begin": "Begin Encounter"}}"#)?;
//! assert_eq!(localizer.resolve("@Localize[COMBAT.Begin]"), "Begin Encounter");
//! assert_eq!(localizer.resolve("@Localize[COMBAT.End]"), "@Localize[COMBAT.End]");
//! # Ok::<(), eb_markup::LocalizeError>(())
//! ```

mod document;
mod shared;
mod source;

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::{LocalizeError, LookupError};
use document::{Document, clean_text};

pub use shared::{LocalizerCell, current_localizer, shared_localizer};
#[cfg(any(test, feature = "testing"))]
pub use shared::reset_shared_localizer;
pub use source::{DocumentSource, FileSource};

/// `@Localize[path]` placeholder.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@Localize\[([^\]]+)\]").expect("invalid placeholder regex"));

/// Resolver for `@Localize[...]` placeholders.
///
/// Immutable once built; share it behind an [`Arc`](std::sync::Arc) or use
/// [`shared_localizer`] for the process-wide instance.
#[derive(Debug)]
pub struct Localizer {
    origin: String,
    document: Document,
}

impl Localizer {
    /// Build a localizer from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizeError::MalformedDocument`] if `json` is not a JSON
    /// object.
    pub fn from_json(origin: &str, json: &str) -> Result<Self, LocalizeError> {
        Self::parse(origin, json.as_bytes())
    }

    /// Build a localizer from a document source.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizeError::FileNotReadable`] if the source cannot be read
    /// and [`LocalizeError::MalformedDocument`] if its content is not a JSON
    /// object.
    pub fn from_source(source: &dyn DocumentSource) -> Result<Self, LocalizeError> {
        let origin = source.origin();
        let content = source.read()?;
        Self::parse(&origin, &content)
    }

    /// Build a localizer from a file.
    ///
    /// # Errors
    ///
    /// Same as [`Localizer::from_source`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LocalizeError> {
        Self::from_source(&FileSource::new(path.as_ref()))
    }

    fn parse(origin: &str, content: &[u8]) -> Result<Self, LocalizeError> {
        let document = Document::parse(origin, content)?;
        tracing::info!(origin, keys = document.len(), "Loaded localization document");
        Ok(Self {
            origin: origin.to_owned(),
            document,
        })
    }

    /// Where the document was loaded from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Cleaned text leaf at a dot-separated `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] naming why the path does not lead to a text
    /// leaf.
    pub fn lookup(&self, path: &str) -> Result<String, LookupError> {
        self.document.leaf(path).map(clean_text)
    }

    /// Replace every `@Localize[path]` placeholder in `text`.
    ///
    /// Each placeholder is resolved independently; one that fails stays
    /// verbatim without affecting the others.
    #[must_use]
    pub fn resolve(&self, text: &str) -> String {
        if !text.contains("@Localize[") {
            return text.to_owned();
        }

        PLACEHOLDER
            .replace_all(text, |caps: &Captures<'_>| {
                let path = &caps[1];
                match self.lookup(path) {
                    Ok(resolved) => resolved,
                    Err(error) => {
                        tracing::debug!(path, %error, "Unresolved localization placeholder");
                        caps[0].to_owned()
                    }
                }
            })
            .into_owned()
    }

    /// Resolve an arbitrary JSON value into display text.
    ///
    /// `null` becomes an empty string, numbers and booleans their literal
    /// form, strings are resolved, and arrays or objects are rendered as
    /// compact JSON.
    #[must_use]
    pub fn resolve_value(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(text) => self.resolve(text),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                value.to_string()
            }
        }
    }

    /// Resolve optional text; absent input becomes an empty string.
    #[must_use]
    pub fn resolve_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.resolve(t)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    static_assertions::assert_impl_all!(Localizer: Send, Sync);

    fn localizer() -> Localizer {
        let data = json!({
            "PF2E": {
                "NPC": {
                    "Abilities": {
                        "Glossary": {
                            "AttackOfOpportunity": "The monster can make an opportunity attack when a foe provokes.",
                            "Tremorsense": "The monster can sense the vibrations in the ground.",
                            "AllAroundVision": "The monster can see in all directions simultaneously."
                        }
                    }
                },
                "Item": { "Weapon": { "Base": { "club": "club" } } }
            },
            "COMBAT": {
                "Begin": "Begin Encounter",
                "End": "End Encounter"
            },
            "TestData": {
                "WithNewlines": "Line 1\\nLine 2\\nLine 3",
                "WithExtraWhitespace": "  Text with spaces  \\n\\n\\n  More text  ",
                "ComplexText": "This is a complex text with @Localize[PF2E.Item.Weapon.Base.club] and other content.",
                "Count": 3
            }
        });
        Localizer::from_json("test", &data.to_string()).unwrap()
    }

    #[test]
    fn test_resolve_top_level_path() {
        assert_eq!(localizer().resolve("@Localize[COMBAT.Begin]"), "Begin Encounter");
    }

    #[test]
    fn test_resolve_multiple_placeholders() {
        assert_eq!(
            localizer().resolve(
                "@Localize[PF2E.NPC.Abilities.Glossary.AttackOfOpportunity] and @Localize[PF2E.NPC.Abilities.Glossary.Tremorsense]"
            ),
            "The monster can make an opportunity attack when a foe provokes. and The monster can sense the vibrations in the ground."
        );
    }

    #[test]
    fn test_resolve_keeps_surrounding_text() {
        assert_eq!(
            localizer().resolve(
                "The creature has @Localize[PF2E.NPC.Abilities.Glossary.AllAroundVision] which is very useful."
            ),
            "The creature has The monster can see in all directions simultaneously. which is very useful."
        );
    }

    #[test]
    fn test_resolve_cleans_text() {
        let localizer = localizer();
        assert_eq!(
            localizer.resolve("@Localize[TestData.WithNewlines]"),
            "Line 1\nLine 2\nLine 3"
        );
        assert_eq!(
            localizer.resolve("@Localize[TestData.WithExtraWhitespace]"),
            "Text with spaces  \n\n  More text"
        );
    }

    #[test]
    fn test_resolve_does_not_reprocess_output() {
        assert_eq!(
            localizer().resolve("@Localize[TestData.ComplexText]"),
            "This is a complex text with @Localize[PF2E.Item.Weapon.Base.club] and other content."
        );
    }

    #[test]
    fn test_unresolved_paths_stay_verbatim() {
        let localizer = localizer();
        for input in [
            "@Localize[PF2E.NonExistent.Path]",
            "@Localize[COMBAT.Begin.Invalid]",
            "@Localize[COMBAT]",
            "@Localize[TestData.Count]",
            "@Localize[]",
            "@Localize[PF2E.NPC.Abilities.Glossary.Non Existent]",
        ] {
            assert_eq!(localizer.resolve(input), input);
        }
    }

    #[test]
    fn test_failed_placeholder_does_not_affect_others() {
        assert_eq!(
            localizer().resolve("@Localize[COMBAT.Nope] then @Localize[COMBAT.End]"),
            "@Localize[COMBAT.Nope] then End Encounter"
        );
    }

    #[test]
    fn test_resolve_edge_cases() {
        let localizer = localizer();
        let cases = [
            ("This is just regular text.", "This is just regular text."),
            ("Send email to user@example.com", "Send email to user@example.com"),
            (
                "Email @ user@example.com or @Localize[COMBAT.Begin]",
                "Email @ user@example.com or Begin Encounter",
            ),
            ("", ""),
            ("@", "@"),
            ("@Localize", "@Localize"),
            ("@Localize[COMBAT.Begin", "@Localize[COMBAT.Begin"),
            ("@Localize[COMBAT.Begin]]", "Begin Encounter]"),
            ("@Localize[PF2E.Item[test]]", "@Localize[PF2E.Item[test]]"),
        ];
        for (input, expected) in cases {
            assert_eq!(localizer.resolve(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_resolve_value_scalars() {
        let localizer = localizer();
        assert_eq!(localizer.resolve_value(&json!("@Localize[COMBAT.Begin]")), "Begin Encounter");
        assert_eq!(localizer.resolve_value(&json!(42)), "42");
        assert_eq!(localizer.resolve_value(&json!(2.5)), "2.5");
        assert_eq!(localizer.resolve_value(&json!(-7)), "-7");
        assert_eq!(localizer.resolve_value(&json!(true)), "true");
        assert_eq!(localizer.resolve_value(&Value::Null), "");
    }

    #[test]
    fn test_resolve_value_composites_render_as_json() {
        let localizer = localizer();
        assert_eq!(localizer.resolve_value(&json!(["a", 1])), r#"["a",1]"#);
        assert_eq!(localizer.resolve_value(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_resolve_opt() {
        let localizer = localizer();
        assert_eq!(localizer.resolve_opt(None), "");
        assert_eq!(localizer.resolve_opt(Some("@Localize[COMBAT.End]")), "End Encounter");
    }

    #[test]
    fn test_lookup_reports_reason() {
        let localizer = localizer();
        assert_eq!(localizer.lookup("COMBAT.End").unwrap(), "End Encounter");
        assert_eq!(
            localizer.lookup("COMBAT.Begin.Invalid").unwrap_err(),
            LookupError::NotABranch {
                key: "COMBAT.Begin".to_owned()
            }
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        std::fs::write(&path, r#"{"COMBAT": {"Settings": "Encounter Tracker Settings"}}"#).unwrap();

        let localizer = Localizer::load(&path).unwrap();
        assert_eq!(localizer.origin(), path.display().to_string());
        assert_eq!(
            localizer.resolve("@Localize[COMBAT.Settings]"),
            "Encounter Tracker Settings"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Localizer::load("/non/existent/file.json").unwrap_err();
        assert!(matches!(err, LocalizeError::FileNotReadable { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, r#"{"invalid": json}"#).unwrap();

        let err = Localizer::load(&path).unwrap_err();
        assert!(matches!(err, LocalizeError::MalformedDocument { .. }));
    }
}
