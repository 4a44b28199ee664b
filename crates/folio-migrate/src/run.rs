//! Whole-run coordination: preflight, serial project loop, summary.

use folio_core::{EntityKind, SourceProject};
use folio_remote::RemoteStore;
use serde::Serialize;

use crate::cancel::CancellationToken;
use crate::error::{MigrateError, ProjectError, Step};
use crate::media::{MediaDeduplicator, MediaStats};
use crate::project::{Migrator, ProjectReport, UpsertAction};
use crate::resolver::ResolverStats;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after the first failed project.
    pub fail_fast: bool,
    /// Restrict the run to these project slugs. Empty means all.
    pub only: Vec<String>,
}

/// A project that did not migrate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFailure {
    pub slug: String,
    pub step: Step,
    pub message: String,
}

impl From<&ProjectError> for ProjectFailure {
    fn from(err: &ProjectError) -> Self {
        Self {
            slug: err.slug.clone(),
            step: err.step,
            message: err.source.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub taxonomy: ResolverStats,
    pub media: MediaStats,
}

/// Summary of a finished (or interrupted) run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Projects selected for this run.
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: Vec<ProjectFailure>,
    /// Projects never attempted because the run stopped early.
    pub skipped: usize,
    pub cancelled: bool,
    pub stats: RunStats,
    pub projects: Vec<ProjectReport>,
}

impl RunReport {
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.created + self.updated
    }

    /// Every selected project migrated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0 && !self.cancelled
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug)]
pub enum RunEvent<'a> {
    Started { slug: &'a str, index: usize, total: usize },
    Succeeded(&'a ProjectReport),
    Failed(&'a ProjectFailure),
}

/// Confirm the backend is reachable and accepts the credential.
///
/// Lists one project record. Returns the project count the backend reports,
/// if any.
///
/// # Errors
///
/// [`MigrateError::Connectivity`] when the listing call fails.
pub async fn preflight<S: RemoteStore + ?Sized>(store: &S) -> Result<Option<u64>, MigrateError> {
    let page = store
        .list_page(EntityKind::Project, 1)
        .await
        .map_err(MigrateError::Connectivity)?;
    tracing::info!(existing_projects = ?page.total, "backend reachable");
    Ok(page.total)
}

/// Drives a migration run against one store.
pub struct RunCoordinator<'s, S: RemoteStore + ?Sized> {
    store: &'s S,
    migrator: Migrator<'s, S>,
    options: RunOptions,
}

impl<'s, S: RemoteStore + ?Sized> RunCoordinator<'s, S> {
    #[must_use]
    pub fn new(
        store: &'s S,
        media: MediaDeduplicator,
        options: RunOptions,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            store,
            migrator: Migrator::new(store, media, cancel),
            options,
        }
    }

    /// See [`preflight`].
    ///
    /// # Errors
    ///
    /// [`MigrateError::Connectivity`] when the listing call fails.
    pub async fn preflight(&self) -> Result<Option<u64>, MigrateError> {
        preflight(self.store).await
    }

    /// Migrate `projects` in input order.
    ///
    /// Per-project failures are recorded in the report and do not stop the
    /// run unless `fail_fast` is set. Cancellation stops the run before the
    /// next project or network call.
    pub async fn run(
        &mut self,
        projects: &[SourceProject],
        mut on_event: impl FnMut(RunEvent<'_>),
    ) -> RunReport {
        let selected = self.select(projects);
        let total = selected.len();
        let mut report = RunReport {
            total,
            ..RunReport::default()
        };
        tracing::info!(total, "starting migration");

        for (index, project) in selected.iter().enumerate() {
            if self.migrator.cancellation().is_cancelled() {
                report.cancelled = true;
                report.skipped = total - index;
                tracing::warn!(remaining = report.skipped, "migration cancelled");
                break;
            }

            on_event(RunEvent::Started {
                slug: &project.id,
                index,
                total,
            });

            match self.migrator.migrate_project(project).await {
                Ok(done) => {
                    match done.action {
                        UpsertAction::Created => report.created += 1,
                        UpsertAction::Updated => report.updated += 1,
                    }
                    on_event(RunEvent::Succeeded(&done));
                    report.projects.push(done);
                }
                Err(err) if err.is_cancelled() => {
                    report.cancelled = true;
                    report.skipped = total - index;
                    tracing::warn!(
                        slug = %err.slug,
                        step = %err.step,
                        "migration cancelled mid-project"
                    );
                    break;
                }
                Err(err) => {
                    tracing::error!(
                        slug = %err.slug,
                        step = %err.step,
                        error = %err.source,
                        "project failed"
                    );
                    let failure = ProjectFailure::from(&err);
                    on_event(RunEvent::Failed(&failure));
                    report.failed.push(failure);
                    if self.options.fail_fast {
                        report.skipped = total - index - 1;
                        tracing::warn!(remaining = report.skipped, "stopping after first failure");
                        break;
                    }
                }
            }
        }

        report.stats = RunStats {
            taxonomy: self.migrator.resolver_stats(),
            media: self.migrator.media_stats(),
        };
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed.len(),
            skipped = report.skipped,
            "migration finished"
        );
        report
    }

    fn select<'p>(&self, projects: &'p [SourceProject]) -> Vec<&'p SourceProject> {
        if self.options.only.is_empty() {
            return projects.iter().collect();
        }
        for slug in &self.options.only {
            if !projects.iter().any(|p| &p.id == slug) {
                tracing::warn!(slug, "requested project not found in export");
            }
        }
        projects
            .iter()
            .filter(|p| self.options.only.contains(&p.id))
            .collect()
    }
}
