//! Description text engine for Encounterbrew.
//!
//! Game records (monster abilities, spells, items, conditions) carry
//! description strings written in a compact markup dialect. This crate turns
//! them into clean display prose.
//!
//! # Architecture
//!
//! Two independent components, composed by the caller:
//!
//! - [`Rewriter`]: an ordered table of directive rules for inline rolls,
//!   damage, area templates, checks and cross-references. Total and pure.
//! - [`Localizer`]: resolves `@Localize[dot.path]` placeholders against a
//!   nested JSON document loaded once. [`shared_localizer`] provides the
//!   process-wide instance with exactly-once initialization.
//!
//! [`render_description`] runs both in the usual order, and the remaining
//! helpers ([`format_ordinal`], [`modify_damage`], ...) cover small stat block
//! formatting needs.
//!
//! # Example
//!
//! ```
//! use eb_markup::{Localizer, RenderOptions, render_description};
//!
//! let localizer = Localizer::from_json("inline", r#"{"COMBAT": {"Begin": "Begin Encounter"}}"#)?;
//! let text = "@Localize[COMBAT.Begin]: roll [[/r 1d20+5]] against @Check[will|dc:18].";
//! assert_eq!(
//!     render_description(text, Some(&localizer), RenderOptions::default()),
//!     "Begin Encounter: roll 1d20+5 against DC 18 will."
//! );
//! # Ok::<(), eb_markup::LocalizeError>(())
//! ```

mod error;
mod localizer;
mod render;
mod rewriter;
mod util;

pub use error::{LocalizeError, LookupError};
#[cfg(any(test, feature = "testing"))]
pub use localizer::reset_shared_localizer;
pub use localizer::{
    DocumentSource, FileSource, Localizer, LocalizerCell, current_localizer, shared_localizer,
};
pub use render::{RenderOptions, render_description};
pub use rewriter::{Rewriter, rewrite};
pub use util::{
    capitalize_first, format_ordinal, format_signed, modify_damage, remove_trailing_comma,
    strip_html,
};
