//! Full description rendering: localize, rewrite, strip dividers.

use crate::localizer::Localizer;
use crate::rewriter;
use crate::util::strip_html;

/// Options for [`render_description`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Remove `<hr />` dividers after rewriting.
    pub strip_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { strip_html: true }
    }
}

/// Render raw description text for display.
///
/// Placeholders are localized first (when a localizer is given) so that
/// directives inside localized text are still rewritten.
///
/// # Examples
///
/// ```
/// use eb_markup::{render_description, RenderOptions};
///
/// let text = "Save @Check[reflex|dc:19|basic].<hr />";
/// assert_eq!(render_description(text, None, RenderOptions::default()), "Save DC 19 basic reflex.");
/// ```
#[must_use]
pub fn render_description(text: &str, localizer: Option<&Localizer>, options: RenderOptions) -> String {
    let localized = match localizer {
        Some(localizer) => localizer.resolve(text),
        None => text.to_owned(),
    };

    let rewritten = rewriter::rewrite(&localized);

    if options.strip_html {
        strip_html(&rewritten)
    } else {
        rewritten
    }
}
