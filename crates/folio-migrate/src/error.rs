//! Migration error types.
//!
//! [`MigrateError`] is what a single resolution or write produces.
//! [`ProjectError`] wraps it at the project boundary with the slug and the
//! step that failed, which is what the run report records.

use std::fmt;

use folio_core::EntityKind;
use folio_remote::RemoteError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    /// The backend could not be reached (or rejected the credential) before
    /// any migration work started.
    #[error("backend connectivity check failed: {0}")]
    Connectivity(#[source] RemoteError),

    /// A category or tag name derives to an empty natural key.
    #[error("cannot derive a key for {kind} name {name:?}")]
    EmptyKey { kind: EntityKind, name: String },

    /// Looking up or creating a category or tag failed.
    #[error("failed to resolve {kind} '{name}': {source}")]
    Resolution {
        kind: EntityKind,
        name: String,
        #[source]
        source: RemoteError,
    },

    /// Uploading an existing media file failed.
    #[error("failed to upload media {path}: {source}")]
    MediaUpload {
        path: String,
        #[source]
        source: RemoteError,
    },

    /// A project lookup, create or update failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The run was cancelled before this call was issued.
    #[error("migration cancelled")]
    Cancelled,
}

/// Where inside a project migration a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Category,
    Tag,
    HeroMedia,
    GalleryMedia,
    ProjectLookup,
    ProjectCreate,
    ProjectUpdate,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
            Self::HeroMedia => "hero_media",
            Self::GalleryMedia => "gallery_media",
            Self::ProjectLookup => "project_lookup",
            Self::ProjectCreate => "project_create",
            Self::ProjectUpdate => "project_update",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed project migration.
#[derive(Debug, Error)]
#[error("project '{slug}' failed at {step}: {source}")]
pub struct ProjectError {
    pub slug: String,
    pub step: Step,
    pub source: MigrateError,
}

impl ProjectError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.source, MigrateError::Cancelled)
    }
}
