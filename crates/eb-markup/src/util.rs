//! Small string helpers for stat block display.

use std::sync::LazyLock;

use regex::Regex;

/// `NdM` with an optional flat modifier, e.g. `2d8+5` or `d6 - 1`.
static DICE_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d*)d(\d+)\s*(?:([+-])\s*(\d+))?\s*$").expect("invalid dice expression regex")
});

/// Self-closing divider tag removed by [`strip_html`].
const DIVIDER: &str = "<hr />";

/// Format a level or rank as an English ordinal.
///
/// Input that is not a positive integer is returned unchanged.
///
/// # Examples
///
/// ```
/// use eb_markup::format_ordinal;
///
/// assert_eq!(format_ordinal("1"), "1st");
/// assert_eq!(format_ordinal("12"), "12th");
/// assert_eq!(format_ordinal("23"), "23rd");
/// assert_eq!(format_ordinal("cantrip"), "cantrip");
/// ```
#[must_use]
pub fn format_ordinal(level: &str) -> String {
    let n = match level.parse::<i64>() {
        Ok(n) if n > 0 => n,
        _ => return level.to_owned(),
    };

    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Format a modifier with an explicit `+` for positive values.
///
/// Zero is rendered without a sign.
#[must_use]
pub fn format_signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Remove every `<hr />` divider, leaving other markup untouched.
#[must_use]
pub fn strip_html(text: &str) -> String {
    text.replace(DIVIDER, "")
}

/// Add `delta` to the flat modifier of a dice expression.
///
/// The modifier term is omitted when the combined value is zero. Input that
/// is not a dice expression is returned unchanged.
///
/// # Examples
///
/// ```
/// use eb_markup::modify_damage;
///
/// assert_eq!(modify_damage("2d8+5", 3), "2d8+8");
/// assert_eq!(modify_damage("3d6+5", -5), "3d6");
/// assert_eq!(modify_damage("1d6", -2), "1d6-2");
/// ```
#[must_use]
pub fn modify_damage(dice: &str, delta: i64) -> String {
    let Some(caps) = DICE_EXPR.captures(dice) else {
        return dice.to_owned();
    };

    let existing = match (caps.get(3), caps.get(4)) {
        (Some(sign), Some(value)) => {
            let Ok(value) = value.as_str().parse::<i64>() else {
                return dice.to_owned();
            };
            if sign.as_str() == "-" { -value } else { value }
        }
        _ => 0,
    };

    let count = &caps[1];
    let size = &caps[2];
    match existing.saturating_add(delta) {
        0 => format!("{count}d{size}"),
        total if total > 0 => format!("{count}d{size}+{total}"),
        total => format!("{count}d{size}{total}"),
    }
}

/// Drop a trailing `", "` separator left over from joining a list.
#[must_use]
pub fn remove_trailing_comma(text: &str) -> &str {
    text.strip_suffix(", ").unwrap_or(text)
}

/// Upper-case the first character.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
