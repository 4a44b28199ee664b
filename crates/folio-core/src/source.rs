//! Source export records.
//!
//! These mirror the JSON written by the static site's content export. Every
//! field except `id` is optional; absent fields stay absent all the way into
//! the project payload.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// A project as it appears in the source export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceProject {
    /// Stable identifier, used verbatim as the remote project slug.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Single category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// `null` reads as an empty list.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<String>>")]
    pub tags: Vec<String>,
    /// Hero image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<MediaReference>,
    /// Gallery media, in display order.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<MediaReference>>")]
    pub media_gallery: Vec<MediaReference>,
}

impl SourceProject {
    /// Check the invariants the migration relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the identifier is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation(
                "project id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Media references in migration order: hero first, then gallery.
    pub fn media(&self) -> impl Iterator<Item = &MediaReference> {
        self.thumbnail.iter().chain(self.media_gallery.iter())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Project year, kept in whichever form the export used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

/// A pointer to a media file below the configured media root.
///
/// The path is usually the public URL the site served the file under
/// (`/media/projects/<file>`); other fields in the export are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MediaReference {
    #[serde(default)]
    pub path: Option<String>,
}

impl MediaReference {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// The non-blank path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path().is_none()
    }
}
