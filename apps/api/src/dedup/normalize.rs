//! Comparison-only canonical forms for free-text posting fields.

/// Lowercases, collapses whitespace runs to one space and trims.
/// Absent input normalizes to the empty string.
pub fn normalize_text(text: Option<&str>) -> String {
    text.unwrap_or("")
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Like `normalize_text`, but strips commas first so "Sydney, NSW" and
/// "Sydney NSW" normalize to the same string.
pub fn normalize_location(location: Option<&str>) -> String {
    let without_commas = location.unwrap_or("").replace(',', "");
    normalize_text(Some(&without_commas))
}
