//! String utilities for the domain layer.

/// Lowercase `text` and split it into alphanumeric words.
///
/// `"E-commerce & AI!"` becomes `["e", "commerce", "ai"]`.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Collapse runs of whitespace and lowercase, for phrase matching.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
