//! Query normalization shared by the lookup operations.

/// Trims and lowercases a free-text query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Lowercases a query and turns spaces into underscores so that
/// `"Snail Secretion"` lines up with the `snail_secretion` key.
#[must_use]
pub fn normalize_key(query: &str) -> String {
    query.to_lowercase().replace(' ', "_")
}

/// Case-insensitive containment of an already-normalized needle.
#[must_use]
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
