//! Natural-key resolution for categories and tags.
//!
//! A name is turned into its slug, then resolved in three tiers: the run
//! cache, a remote lookup by slug, and finally a create. The remote lookup is
//! what makes repeated runs converge on the same records.

use folio_core::slug::derive_key;
use folio_core::{EntityKind, RemoteId};
use folio_remote::{RemoteError, RemoteStore};
use serde::Serialize;

use crate::cache::KeyCache;
use crate::error::MigrateError;
use crate::payload::TaxonomyPayload;

/// How a resolved id was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cached,
    Found,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub id: RemoteId,
    pub origin: Origin,
}

/// Counters over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolverStats {
    pub cache_hits: usize,
    pub found: usize,
    pub created: usize,
}

/// Resolves `(kind, name)` pairs to remote ids, creating records on demand.
#[derive(Debug, Default)]
pub struct KeyResolver {
    cache: KeyCache,
    stats: ResolverStats,
}

impl KeyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn stats(&self) -> ResolverStats {
        self.stats
    }

    #[must_use]
    pub const fn cache(&self) -> &KeyCache {
        &self.cache
    }

    /// Resolve `name` of `kind` to a remote id.
    ///
    /// # Errors
    ///
    /// [`MigrateError::EmptyKey`] when `name` has no non-whitespace
    /// characters, [`MigrateError::Resolution`] when the lookup or the create
    /// fails.
    pub async fn resolve<S>(
        &mut self,
        store: &S,
        kind: EntityKind,
        name: &str,
    ) -> Result<Resolved, MigrateError>
    where
        S: RemoteStore + ?Sized,
    {
        let key = derive_key(name);
        if key.is_empty() {
            return Err(MigrateError::EmptyKey {
                kind,
                name: name.to_owned(),
            });
        }

        if let Some(id) = self.cache.get(kind, &key) {
            self.stats.cache_hits += 1;
            return Ok(Resolved {
                id: id.clone(),
                origin: Origin::Cached,
            });
        }

        let resolution_error = |source: RemoteError| MigrateError::Resolution {
            kind,
            name: name.to_owned(),
            source,
        };

        let found = store
            .lookup_by_key(kind, &key)
            .await
            .map_err(resolution_error)?;
        if let Some(entity) = found {
            tracing::debug!(%kind, key, id = %entity.id, "reusing existing record");
            self.cache.insert(kind, key, entity.id.clone());
            self.stats.found += 1;
            return Ok(Resolved {
                id: entity.id,
                origin: Origin::Found,
            });
        }

        let payload = TaxonomyPayload::new(name.trim(), key.clone());
        let fields = serde_json::to_value(&payload)
            .map_err(|e| resolution_error(RemoteError::Parse(e.to_string())))?;
        let created = store
            .create(kind, &fields)
            .await
            .map_err(resolution_error)?;
        tracing::info!(%kind, key, id = %created.id, "created record");
        self.cache.insert(kind, key, created.id.clone());
        self.stats.created += 1;
        Ok(Resolved {
            id: created.id,
            origin: Origin::Created,
        })
    }
}
