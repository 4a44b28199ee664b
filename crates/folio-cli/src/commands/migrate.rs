use anyhow::Context;
use folio_config::FolioConfig;
use folio_migrate::{
    CancellationToken, MediaDeduplicator, ProjectFailure, RunCoordinator, RunOptions, RunReport,
    UpsertAction,
};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::root_commands::MigrateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared;
use crate::output::output;
use crate::progress::RunProgress;

/// Flat view of a [`RunReport`] for table output.
///
/// Category and tag counters are combined under `taxonomy_*`.
#[derive(Debug, Serialize)]
struct MigrateSummary<'a> {
    total: usize,
    created: usize,
    updated: usize,
    failed: usize,
    skipped: usize,
    cancelled: bool,
    taxonomy_created: usize,
    taxonomy_reused: usize,
    media_uploaded: usize,
    media_reused: usize,
    media_missing: usize,
    media_rejected: usize,
    projects: Vec<ProjectRow<'a>>,
    failures: &'a [ProjectFailure],
}

#[derive(Debug, Serialize)]
struct ProjectRow<'a> {
    slug: &'a str,
    action: UpsertAction,
    id: String,
    missing_media: usize,
    rejected_media: usize,
}

impl<'a> MigrateSummary<'a> {
    fn new(report: &'a RunReport) -> Self {
        let taxonomy = report.stats.taxonomy;
        Self {
            total: report.total,
            created: report.created,
            updated: report.updated,
            failed: report.failed.len(),
            skipped: report.skipped,
            cancelled: report.cancelled,
            taxonomy_created: taxonomy.created,
            taxonomy_reused: taxonomy.found + taxonomy.cache_hits,
            media_uploaded: report.stats.media.uploaded,
            media_reused: report.stats.media.reused,
            media_missing: report.stats.media.missing,
            media_rejected: report.stats.media.rejected,
            projects: report
                .projects
                .iter()
                .map(|project| ProjectRow {
                    slug: &project.slug,
                    action: project.action,
                    id: project.id.to_string(),
                    missing_media: project.missing_media.len(),
                    rejected_media: project.rejected_media.len(),
                })
                .collect(),
            failures: &report.failed,
        }
    }
}

/// Handle `folio migrate`.
pub async fn handle(
    args: &MigrateArgs,
    mut config: FolioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    bootstrap::apply_migrate_overrides(&mut config, args);

    let client = shared::connect(&config)?;
    let projects = shared::load_projects(&config)?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let media = MediaDeduplicator::new(
        config.source.media_dir.clone(),
        config.source.media_url_prefix.clone(),
    );
    let options = RunOptions {
        fail_fast: config.run.fail_fast,
        only: args.only.clone(),
    };
    let mut coordinator = RunCoordinator::new(&client, media, options, cancel);

    coordinator
        .preflight()
        .await
        .with_context(|| format!("cannot reach backend at {}", client.base_url()))?;

    let total = if args.only.is_empty() {
        projects.len()
    } else {
        projects.iter().filter(|p| args.only.contains(&p.id)).count()
    };
    let mut progress = RunProgress::new(total);
    let report = coordinator
        .run(&projects, |event| progress.observe(event))
        .await;
    progress.finish(&report);

    match flags.format {
        OutputFormat::Table => output(&MigrateSummary::new(&report), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}

fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; stopping before the next backend call");
            cancel.cancel();
        }
    });
}
