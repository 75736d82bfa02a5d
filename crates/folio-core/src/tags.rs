//! Tech tag join/split.
//!
//! A project's tech list is stored as one comma-joined string. Order is
//! preserved (it is the display order) and duplicates are allowed; tags
//! are trimmed on the way out so the round-trip is lossless for trimmed
//! input.

/// Join a tech list into its stored form.
pub fn join_tech(tags: &[String]) -> String {
    tags.join(", ")
}

/// Split a stored tech string back into the list.
///
/// Empty segments (from stray or trailing commas) are dropped.
pub fn split_tech(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
