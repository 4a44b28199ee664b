//! Run-scoped resolution caches.
//!
//! Both caches are plain owned maps. They are created empty for each run and
//! dropped with it; nothing is persisted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use folio_core::{EntityKind, RemoteId};

/// `(kind, natural key) → remote id` for categories and tags.
#[derive(Debug, Default)]
pub struct KeyCache {
    entries: HashMap<(EntityKind, String), RemoteId>,
}

impl KeyCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, kind: EntityKind, key: &str) -> Option<&RemoteId> {
        self.entries.get(&(kind, key.to_owned()))
    }

    pub fn insert(&mut self, kind: EntityKind, key: impl Into<String>, id: RemoteId) {
        self.entries.insert((kind, key.into()), id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalized media path → uploaded asset id.
///
/// Only successful uploads are recorded. A path whose file was missing is
/// never cached, so it is re-checked on its next reference.
#[derive(Debug, Default)]
pub struct MediaCache {
    entries: HashMap<PathBuf, RemoteId>,
}

impl MediaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&RemoteId> {
        self.entries.get(path)
    }

    pub fn insert(&mut self, path: PathBuf, id: RemoteId) {
        self.entries.insert(path, id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
