//! SEO field derivation for project payloads.

/// Maximum length of a derived SEO description, in characters.
pub const SEO_DESCRIPTION_MAX: usize = 160;

/// Derive the SEO description from a project body.
///
/// Takes the first [`SEO_DESCRIPTION_MAX`] characters verbatim. The cut is not
/// word-aware; an absent body yields an empty string.
#[must_use]
pub fn seo_description(body: Option<&str>) -> String {
    body.map(|text| text.chars().take(SEO_DESCRIPTION_MAX).collect())
        .unwrap_or_default()
}
