use std::sync::OnceLock;

use content_model::TextContent;
use regex::Regex;

fn numbering_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // digits, then ordinal punctuation or a space; `3D` is not an ordinal
    RE.get_or_init(|| {
        Regex::new(r"^[0-9]+(?:[:,.)]+|\s)").expect("numbering prefix pattern is valid")
    })
}

/// Removes a leading list ordinal such as `3.`, `12)` or `7:` and trims the rest.
///
/// Digits glued to a letter (`3D printing`) are left alone.
pub fn strip_numbering_prefix(text: &str) -> String {
    let trimmed = text.trim();
    match numbering_prefix().find(trimmed) {
        Some(m) => trimmed[m.end()..].trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Returns the title candidates with their numbering stripped.
pub fn normalize_titles(titles: Vec<TextContent>) -> Vec<TextContent> {
    titles
        .into_iter()
        .map(|mut title| {
            title.text_string = strip_numbering_prefix(&title.text_string);
            title
        })
        .collect()
}
