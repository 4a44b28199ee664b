//! Remote record identifiers and the minimal record shapes the engine reads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned record identifier.
///
/// Numeric ids are the norm; string document ids are accepted so the engine
/// can thread whatever the backend hands back into relation fields unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RemoteId {
    Numeric(u64),
    Document(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Document(id) => f.write_str(id),
        }
    }
}

impl From<u64> for RemoteId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

/// A Category, Tag or Project record as returned by the backend.
///
/// Only the identifier and natural key are modelled; any other attributes the
/// backend returns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RemoteEntity {
    pub id: RemoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// An uploaded media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Asset {
    pub id: RemoteId,
    /// Public URL assigned by the backend.
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_document_ids_deserialize() {
        let numeric: RemoteId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric, RemoteId::Numeric(42));

        let document: RemoteId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(document, RemoteId::Document("abc123".into()));
    }

    #[test]
    fn numeric_id_serializes_as_number() {
        let json = serde_json::to_string(&RemoteId::from(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn entity_ignores_extra_attributes() {
        let entity: RemoteEntity =
            serde_json::from_str(r#"{"id": 3, "slug": "web", "name": "Web", "publishedAt": null}"#)
                .unwrap();
        assert_eq!(entity.id, RemoteId::Numeric(3));
        assert_eq!(entity.slug.as_deref(), Some("web"));
    }
}
