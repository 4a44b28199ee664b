//! Natural-key derivation.

/// Derive the natural key (slug) for a human-readable name.
///
/// Lowercases the name and joins its whitespace-separated words with single
/// hyphens. Leading and trailing whitespace never produces a hyphen. A name
/// made only of whitespace yields an empty key.
#[must_use]
pub fn derive_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
