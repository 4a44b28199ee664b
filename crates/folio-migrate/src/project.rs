//! Per-project migration.

use std::path::PathBuf;

use folio_core::{EntityKind, MediaReference, RemoteId, SourceProject};
use folio_remote::{RemoteError, RemoteStore};
use serde::Serialize;

use crate::cancel::CancellationToken;
use crate::error::{MigrateError, ProjectError, Step};
use crate::media::{MediaDeduplicator, MediaResolution, MediaStats};
use crate::payload::ProjectPayload;
use crate::resolver::{KeyResolver, ResolverStats};

/// Whether the project record was written fresh or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertAction {
    Created,
    Updated,
}

/// What a successful project migration wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub slug: String,
    pub action: UpsertAction,
    pub id: RemoteId,
    pub category_ids: Vec<RemoteId>,
    pub tag_ids: Vec<RemoteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<RemoteId>,
    pub gallery: Vec<RemoteId>,
    /// Media references whose file did not exist under the media root.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_media: Vec<PathBuf>,
    /// Media files the backend refused to store.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_media: Vec<PathBuf>,
}

/// Local files that resolved to no asset, by cause.
#[derive(Debug, Default)]
struct Unresolved {
    missing: Vec<PathBuf>,
    rejected: Vec<PathBuf>,
}

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// Migrates single projects against one store.
///
/// Owns the run's resolution caches, so every project migrated through the
/// same `Migrator` shares category, tag and media lookups.
pub struct Migrator<'s, S: RemoteStore + ?Sized> {
    store: &'s S,
    resolver: KeyResolver,
    media: MediaDeduplicator,
    cancel: CancellationToken,
}

impl<'s, S: RemoteStore + ?Sized> Migrator<'s, S> {
    #[must_use]
    pub fn new(store: &'s S, media: MediaDeduplicator, cancel: CancellationToken) -> Self {
        Self {
            store,
            resolver: KeyResolver::new(),
            media,
            cancel,
        }
    }

    #[must_use]
    pub const fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }

    #[must_use]
    pub const fn media_stats(&self) -> MediaStats {
        self.media.stats()
    }

    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Migrate one project: dependencies first, then the project upsert.
    ///
    /// # Errors
    ///
    /// Returns a [`ProjectError`] naming the step that failed. Records
    /// written by earlier steps stay in place.
    pub async fn migrate_project(
        &mut self,
        project: &SourceProject,
    ) -> Result<ProjectReport, ProjectError> {
        let slug = project.id.as_str();
        let fail = |step: Step| {
            move |source: MigrateError| ProjectError {
                slug: slug.to_owned(),
                step,
                source,
            }
        };
        tracing::info!(slug, "migrating project");

        let mut category_ids = Vec::new();
        if let Some(category) = project.category.as_deref().filter(|c| !is_blank(c)) {
            self.cancel.check().map_err(fail(Step::Category))?;
            let resolved = self
                .resolver
                .resolve(self.store, EntityKind::Category, category)
                .await
                .map_err(fail(Step::Category))?;
            category_ids.push(resolved.id);
        }

        let mut tag_ids = Vec::with_capacity(project.tags.len());
        for tag in project.tags.iter().filter(|t| !is_blank(t)) {
            self.cancel.check().map_err(fail(Step::Tag))?;
            let resolved = self
                .resolver
                .resolve(self.store, EntityKind::Tag, tag)
                .await
                .map_err(fail(Step::Tag))?;
            tag_ids.push(resolved.id);
        }

        let mut unresolved = Unresolved::default();
        let hero_image = match &project.thumbnail {
            Some(reference) => self
                .resolve_media(reference, &mut unresolved)
                .await
                .map_err(fail(Step::HeroMedia))?,
            None => None,
        };

        let mut gallery = Vec::with_capacity(project.media_gallery.len());
        for reference in &project.media_gallery {
            if let Some(id) = self
                .resolve_media(reference, &mut unresolved)
                .await
                .map_err(fail(Step::GalleryMedia))?
            {
                gallery.push(id);
            }
        }
        tracing::info!(
            slug,
            categories = category_ids.len(),
            tags = tag_ids.len(),
            hero = hero_image.is_some(),
            gallery = gallery.len(),
            "dependencies resolved"
        );

        self.cancel.check().map_err(fail(Step::ProjectLookup))?;
        let existing = self
            .store
            .lookup_by_key(EntityKind::Project, slug)
            .await
            .map_err(|e| fail(Step::ProjectLookup)(e.into()))?;

        let payload = ProjectPayload::build(
            project,
            category_ids.clone(),
            tag_ids.clone(),
            hero_image.clone(),
            gallery.clone(),
        );
        let step = if existing.is_some() {
            Step::ProjectUpdate
        } else {
            Step::ProjectCreate
        };
        let fields = serde_json::to_value(&payload)
            .map_err(|e| fail(step)(RemoteError::Parse(e.to_string()).into()))?;

        self.cancel.check().map_err(fail(step))?;
        let (action, written) = match existing {
            Some(entity) => {
                let written = self
                    .store
                    .update(EntityKind::Project, &entity.id, &fields)
                    .await
                    .map_err(|e| fail(step)(e.into()))?;
                (UpsertAction::Updated, written)
            }
            None => {
                let written = self
                    .store
                    .create(EntityKind::Project, &fields)
                    .await
                    .map_err(|e| fail(step)(e.into()))?;
                (UpsertAction::Created, written)
            }
        };
        tracing::info!(slug, id = %written.id, ?action, "project written");

        Ok(ProjectReport {
            slug: slug.to_owned(),
            action,
            id: written.id,
            category_ids,
            tag_ids,
            hero_image,
            gallery,
            missing_media: unresolved.missing,
            rejected_media: unresolved.rejected,
        })
    }

    async fn resolve_media(
        &mut self,
        reference: &MediaReference,
        unresolved: &mut Unresolved,
    ) -> Result<Option<RemoteId>, MigrateError> {
        if reference.is_empty() {
            return Ok(None);
        }
        self.cancel.check()?;
        match self.media.resolve(self.store, reference).await? {
            MediaResolution::Asset { id, .. } => Ok(Some(id)),
            MediaResolution::Missing(path) => {
                unresolved.missing.push(path);
                Ok(None)
            }
            MediaResolution::Rejected(path) => {
                unresolved.rejected.push(path);
                Ok(None)
            }
            MediaResolution::Empty => Ok(None),
        }
    }
}
