//! The directive rule table.
//!
//! Rules are listed most specific first. Within a family, every shape variant
//! gets its own rule; a field-based catch-all closes each family so that
//! reordered or extra fields still produce readable text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Rule;

/// One `formula[type]` part inside a multi-part damage directive.
static DAMAGE_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\(([^()\[\]@{}]+)\)|([^()\[\]@{},]+))\[([^\[\]@{}]*)\]")
        .expect("invalid damage part regex")
});

/// Build the rule table in priority order.
pub(super) fn default_rules() -> Vec<Rule> {
    vec![
        // Inline rolls.
        Rule::new(
            "dice_br_text",
            r"\[\[/br (?:[^\[\]{}]|\[[^\[\]]*\]|\{[^{}\[\]]*\})+\]\]\{([^}]+)\}",
            first_capture,
        ),
        Rule::new(
            "dice_r_text",
            r"\[\[/r (?:[^\[\]{}]|\[[^\[\]]*\]|\{[^{}\[\]]*\})+\]\]\{([^}]+)\}",
            first_capture,
        ),
        Rule::new(
            "dice_gmr_text",
            r"\[\[/gmr (?:[^\[\]{}]|\[[^\[\]]*\]|\{[^{}\[\]]*\})+\]\]\{([^}]+)\}",
            first_capture,
        ),
        Rule::new(
            "dice_bare",
            r"\[\[/(?:r|br|gmr) ((?:[^\[\]{}]|\[[^\[\]]*\]|\{[^{}\[\]]*\})+)\]\](?:\{\})?",
            first_capture,
        ),
        // Damage.
        Rule::new(
            "damage_level",
            r"@Damage\[[^\[\]{}]*@item\.level[^\[\]{}]*\[([^\[\]@{}]*)\]\](?:\{[^}]*\})?",
            damage_type_only,
        ),
        Rule::new(
            "damage_dice",
            r"@Damage\[(?:\(([^()\[\]@{}]+)\)|([^()\[\]@{},]+))\[([^\[\]@{}]*)\]\](?:\{[^}]*\})?",
            damage_dice,
        ),
        Rule::new(
            "damage_parts",
            r"@Damage\[((?:\([^()\[\]@{}]+\)|[^()\[\]@{},]+)\[[^\[\]@{}]*\](?:,(?:\([^()\[\]@{}]+\)|[^()\[\]@{},]+)\[[^\[\]@{}]*\])+)\](?:\{[^}]*\})?",
            damage_parts,
        ),
        // Area templates.
        Rule::new(
            "template_text",
            r"@Template\[([^\[\]|@{}:]+)\|distance:(\d+)\]\{[^}]*\}",
            template_distance,
        ),
        Rule::new(
            "template_traits",
            r"@Template\[([^\[\]|@{}:]+)\|distance:(\d+)\|traits:([^\[\]|@{}]*)\](?:\{[^}]*\})?",
            template_traits,
        ),
        Rule::new(
            "template_bare",
            r"@Template\[([^\[\]|@{}:]+)\|distance:(\d+)\]",
            template_distance,
        ),
        Rule::new(
            "template_fields",
            r"@Template\[([^\[\]|@{}]*)((?:\|[^\[\]|@{}]*)+)\](?:\{[^}]*\})?",
            template_fields,
        ),
        // Checks.
        Rule::new(
            "check_basic_traits",
            r"@Check\[([^\[\]|@{}:]+)\|dc:(\d+)\|basic(?::true)?(?:\|overrideTraits:\w+)?\|traits:[^\[\]|@{}]*(?:\|overrideTraits:\w+)?\](?:\{[^}]*\})?",
            check_basic,
        ),
        Rule::new(
            "check_traits",
            r"@Check\[([^\[\]|@{}:]+)\|dc:(\d+)(?:\|overrideTraits:\w+)?\|traits:([^\[\]|@{}]*)(?:\|overrideTraits:\w+)?\](?:\{[^}]*\})?",
            check_traits,
        ),
        Rule::new(
            "check_show_dc",
            r"@Check\[([^\[\]|@{}:]+)\|showDC:all\|dc:(\d+)\](?:\{[^}]*\})?",
            check_show_dc,
        ),
        Rule::new(
            "check_basic",
            r"@Check\[([^\[\]|@{}:]+)\|dc:(\d+)\|basic(?::true)?\](?:\{[^}]*\})?",
            check_basic,
        ),
        Rule::new(
            "check_bare",
            r"@Check\[([^\[\]|@{}:]+)\|dc:(\d+)\](?:\{[^}]*\})?",
            check_bare,
        ),
        Rule::new(
            "check_fields",
            r"@Check\[([^\[\]|@{}]+)((?:\|[^\[\]|@{}]*)+)\](?:\{[^}]*\})?",
            check_fields,
        ),
        // Cross-references.
        Rule::new(
            "uuid_item_text",
            r"@UUID\[Compendium\.([^\[\]|@{}]+?)\.Item\.([^\[\]|@{}]+)\]\{([^}]*)\}",
            uuid_item_text,
        ),
        Rule::new(
            "uuid_item",
            r"@UUID\[Compendium\.([^\[\]|@{}]+?)\.Item\.([^\[\]|@{}]+)\]",
            uuid_item,
        ),
        Rule::new(
            "uuid_actor",
            r"@UUID\[Compendium\.([^\[\]|@{}]+?)\.Actor\.([^\[\]|@{}]+)\](?:\{([^}]*)\})?",
            uuid_actor,
        ),
        Rule::new(
            "uuid_other",
            r"@UUID\[([^\[\]@{}]*)\](?:\{([^}]*)\})?",
            uuid_other,
        ),
        // Placeholders the localizer did not resolve.
        Rule::new(
            "localize",
            r"@Localize\[([^\[\]@{}]+)\](?:\{([^}]*)\})?",
            localize_key,
        ),
        Rule::new(
            "unknown",
            r"@(\w+)\[([^\[\]@{}]*)\](?:\{([^}]*)\})?",
            unknown_directive,
        ),
    ]
}

fn first_capture(caps: &Captures<'_>) -> String {
    caps[1].to_owned()
}

/// Non-empty attached `{text}` captured in group `index`.
fn attached_text<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index)
        .map(|m| m.as_str())
        .filter(|text| !text.trim().is_empty())
}

fn damage_type_only(caps: &Captures<'_>) -> String {
    caps[1].trim().to_owned()
}

fn damage_dice(caps: &Captures<'_>) -> String {
    let formula = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
    format_damage(formula, &caps[3])
}

fn damage_parts(caps: &Captures<'_>) -> String {
    DAMAGE_PART
        .captures_iter(&caps[1])
        .map(|part| {
            let formula = part.get(1).or_else(|| part.get(2)).map_or("", |m| m.as_str());
            format_damage(formula, &part[3])
        })
        .collect::<Vec<_>>()
        .join(" plus ")
}

fn format_damage(formula: &str, damage_type: &str) -> String {
    let (formula, damage_type) = (formula.trim(), damage_type.trim());
    match (formula.is_empty(), damage_type.is_empty()) {
        (_, true) => formula.to_owned(),
        (true, false) => damage_type.to_owned(),
        (false, false) => format!("{formula} {damage_type}"),
    }
}

fn template_distance(caps: &Captures<'_>) -> String {
    format!("{} ({} feet)", &caps[1], &caps[2])
}

fn template_traits(caps: &Captures<'_>) -> String {
    let traits = join_list(&caps[3]);
    if traits.is_empty() {
        template_distance(caps)
    } else {
        format!("{} ({} feet, {traits})", &caps[1], &caps[2])
    }
}

fn template_fields(caps: &Captures<'_>) -> String {
    let shape = strip_type_prefix(&caps[1]);
    let mut distance = None;
    let mut traits = String::new();
    for field in caps[2].split('|') {
        if let Some(value) = field.strip_prefix("distance:") {
            distance = Some(value);
        } else if let Some(value) = field.strip_prefix("traits:") {
            traits = join_list(value);
        }
    }

    match distance {
        None => shape.to_owned(),
        Some(distance) if traits.is_empty() => format!("{shape} ({distance} feet)"),
        Some(distance) => format!("{shape} ({distance} feet, {traits})"),
    }
}

/// `a,b,c` → `a, b, c`.
fn join_list(list: &str) -> String {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn strip_type_prefix(value: &str) -> &str {
    value.strip_prefix("type:").unwrap_or(value)
}

fn check_basic(caps: &Captures<'_>) -> String {
    format!("DC {} basic {}", &caps[2], &caps[1])
}

fn check_show_dc(caps: &Captures<'_>) -> String {
    format!("DC {} {} check", &caps[2], &caps[1])
}

fn check_bare(caps: &Captures<'_>) -> String {
    format!("DC {} {}", &caps[2], &caps[1])
}

fn check_traits(caps: &Captures<'_>) -> String {
    // Only `namespace:namespace:name` trait lists carry a displayable name.
    let annotation = caps[3]
        .split(':')
        .nth(2)
        .map(|name| name.replace('-', " "))
        .filter(|name| !name.trim().is_empty());
    match annotation {
        Some(name) => format!("DC {} {} ({name})", &caps[2], &caps[1]),
        None => check_bare(caps),
    }
}

fn check_fields(caps: &Captures<'_>) -> String {
    let check_type = strip_type_prefix(&caps[1]);
    let mut dc = None;
    let mut basic = false;
    let mut show_dc = false;
    for field in caps[2].split('|') {
        if let Some(value) = field.strip_prefix("dc:") {
            dc = Some(value);
        } else if field == "basic" || field == "basic:true" {
            basic = true;
        } else if field.starts_with("showDC") {
            show_dc = true;
        }
    }

    match dc {
        None => check_type.to_owned(),
        Some(dc) if basic => format!("DC {dc} basic {check_type}"),
        Some(dc) if show_dc => format!("DC {dc} {check_type} check"),
        Some(dc) => format!("DC {dc} {check_type}"),
    }
}

fn uuid_item_text(caps: &Captures<'_>) -> String {
    let slug = &caps[2];
    let text = &caps[3];
    // A digit marks a condition value such as "Frightened 1".
    if text.chars().any(|c| c.is_ascii_digit()) {
        return text.to_owned();
    }
    if is_document_id(slug) && !text.trim().is_empty() {
        return text.to_owned();
    }
    uuid_item(caps)
}

fn uuid_item(caps: &Captures<'_>) -> String {
    let slug = &caps[2];
    if is_document_id(slug) {
        return compendium_category(&caps[1]).to_owned();
    }
    slug_to_name(slug)
}

fn uuid_actor(caps: &Captures<'_>) -> String {
    if let Some(text) = attached_text(caps, 3) {
        return text.to_owned();
    }
    let name = &caps[2];
    name.split_whitespace().last().unwrap_or(name).to_owned()
}

fn uuid_other(caps: &Captures<'_>) -> String {
    if let Some(text) = attached_text(caps, 2) {
        return text.to_owned();
    }
    caps[1].rsplit('.').next().map(slug_to_name).unwrap_or_default()
}

fn localize_key(caps: &Captures<'_>) -> String {
    if let Some(text) = attached_text(caps, 2) {
        return text.to_owned();
    }
    caps[1].rsplit('.').next().map(slug_to_name).unwrap_or_default()
}

fn unknown_directive(caps: &Captures<'_>) -> String {
    if let Some(text) = attached_text(caps, 3) {
        return text.to_owned();
    }
    let body = &caps[2];
    if let Some(value) = body.split('|').find_map(|field| field.strip_prefix("value:")) {
        return value.to_owned();
    }
    if !body.contains('|') {
        return body.to_owned();
    }
    caps[1].to_lowercase()
}

fn slug_to_name(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
}

/// Whether a slug is a generated document ID rather than a readable name.
fn is_document_id(slug: &str) -> bool {
    slug.len() >= 12
        && slug.chars().all(|c| c.is_ascii_alphanumeric())
        && slug.chars().any(|c| c.is_ascii_digit())
        && slug.chars().any(|c| c.is_ascii_alphabetic())
}

/// Display category for a compendium pack such as `pf2e.conditionitems`.
fn compendium_category(pack: &str) -> &str {
    let name = pack.rsplit('.').next().unwrap_or(pack);
    match name {
        "conditionitems" => "condition",
        "spells-srd" | "spells" => "spell",
        "equipment" | "equipment-srd" => "item",
        "actionspf2e" => "action",
        _ => name,
    }
}
