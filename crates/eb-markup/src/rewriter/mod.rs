//! Directive rewriting for game description text.
//!
//! Description strings from monster, spell and item records embed compact
//! directives such as `@Check[reflex|dc:19|basic]`, `@Damage[2d6[fire]]` or
//! `[[/r 1d20+5]]`. The [`Rewriter`] turns them into display prose.
//!
//! # Processing model
//!
//! The rewriter owns an ordered table of rules, each a compiled pattern plus a
//! transform. Rules run in fixed priority order, most specific shape first:
//!
//! 1. Inline rolls with attached text, then bare inline rolls
//! 2. Damage (level-dependent, explicit dice, multi-part)
//! 3. Area templates (inline text, traits, bare, field fallback)
//! 4. Checks (basic with traits, traits, `showDC`, basic, bare, field fallback)
//! 5. Cross-references (Item with text, Item, Actor, other)
//! 6. Leftover `@Localize[...]` placeholders
//! 7. Unknown `@Word[...]` directives
//!
//! Each rule makes one forward pass over the text. Its replacements are final:
//! later rules never see them. A directive whose body contains another
//! directive is left exactly as written, as is a directive without a closing
//! bracket.
//!
//! # Example
//!
//! ```
//! use eb_markup::Rewriter;
//!
//! let rewriter = Rewriter::new();
//! assert_eq!(
//!     rewriter.rewrite("Make a @Check[reflex|dc:19|basic] save."),
//!     "Make a DC 19 basic reflex save."
//! );
//! ```

mod rules;
mod segments;

use std::sync::LazyLock;

use regex::{Captures, Regex};

use segments::Segments;

/// Transform applied to one directive occurrence.
type Transform = fn(&Captures<'_>) -> String;

/// A named directive pattern and its rewrite.
#[derive(Debug)]
pub(crate) struct Rule {
    name: &'static str,
    pattern: Regex,
    transform: Transform,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, transform: Transform) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid directive rule regex"),
            transform,
        }
    }
}

/// Ordered directive rule table.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug)]
pub struct Rewriter {
    rules: Vec<Rule>,
}

impl Rewriter {
    /// Compile the rule table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
        }
    }

    /// Rule names in the order they are applied.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// Rewrite every recognized directive in `text`.
    ///
    /// Never fails. Text without directives is returned unchanged.
    #[must_use]
    pub fn rewrite(&self, text: &str) -> String {
        if !text.contains('@') && !text.contains("[[/") {
            return text.to_owned();
        }

        let mut segments = Segments::new(text);
        for rule in &self.rules {
            let replaced = segments.replace_all(&rule.pattern, rule.transform);
            if replaced > 0 {
                tracing::trace!(rule = rule.name, replaced, "directive rule applied");
            }
        }
        segments.into_string()
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_REWRITER: LazyLock<Rewriter> = LazyLock::new(Rewriter::new);

/// Rewrite `text` with a process-wide [`Rewriter`].
///
/// ```
/// assert_eq!(eb_markup::rewrite("@Damage[11d6[acid]]"), "11d6 acid");
/// ```
#[must_use]
pub fn rewrite(text: &str) -> String {
    DEFAULT_REWRITER.rewrite(text)
}
