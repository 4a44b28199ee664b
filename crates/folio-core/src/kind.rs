//! Remote entity kinds.
//!
//! Each kind maps to one REST collection on the content backend. Category,
//! Tag and Project records carry a unique `slug`; assets are addressed only
//! by their server-assigned identifier.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
    Tag,
    Project,
    Asset,
}

impl EntityKind {
    /// Return the string representation used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
            Self::Project => "project",
            Self::Asset => "asset",
        }
    }

    /// REST collection segment under `/api/`.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Tag => "tags",
            Self::Project => "projects",
            Self::Asset => "upload/files",
        }
    }

    /// Whether records of this kind are unique per slug.
    #[must_use]
    pub const fn has_natural_key(self) -> bool {
        !matches!(self, Self::Asset)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
