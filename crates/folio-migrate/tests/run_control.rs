mod support;

use folio_core::{EntityKind, SourceProject};
use folio_migrate::{
    CancellationToken, MediaDeduplicator, MigrateError, RunCoordinator, RunEvent, RunOptions,
};
use pretty_assertions::assert_eq;
use support::{MemoryStore, media_root};

fn projects(ids: &[&str]) -> Vec<SourceProject> {
    ids.iter()
        .map(|id| SourceProject {
            id: (*id).into(),
            ..SourceProject::default()
        })
        .collect()
}

fn coordinator<'s>(
    store: &'s MemoryStore,
    root: &std::path::Path,
    options: RunOptions,
    cancel: CancellationToken,
) -> RunCoordinator<'s, MemoryStore> {
    RunCoordinator::new(
        store,
        MediaDeduplicator::new(root, "/media/projects/"),
        options,
        cancel,
    )
}

#[tokio::test]
async fn preflight_reports_existing_projects() {
    let root = media_root(&[]);
    let store = MemoryStore::new();
    store.seed(EntityKind::Project, "old");
    let run = coordinator(&store, root.path(), RunOptions::default(), CancellationToken::new());

    assert_eq!(run.preflight().await.unwrap(), Some(1));
    assert_eq!(store.calls().lists, 1);
}

#[tokio::test]
async fn preflight_failure_is_connectivity_error() {
    let root = media_root(&[]);
    let store = MemoryStore::new();
    store.go_offline();
    let run = coordinator(&store, root.path(), RunOptions::default(), CancellationToken::new());

    let err = run.preflight().await.unwrap_err();
    assert!(matches!(err, MigrateError::Connectivity(_)));
}

#[tokio::test]
async fn fail_fast_stops_after_first_failure() {
    let root = media_root(&[]);
    let store = MemoryStore::new();
    store.fail_writes_for(EntityKind::Project, "b");
    let options = RunOptions {
        fail_fast: true,
        ..RunOptions::default()
    };
    let mut run = coordinator(&store, root.path(), options, CancellationToken::new());

    let report = run.run(&projects(&["a", "b", "c", "d"]), |_| {}).await;

    assert_eq!(report.created, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.skipped, 2);
    assert!(store.record(EntityKind::Project, "c").is_none());
}

#[tokio::test]
async fn only_restricts_selection() {
    let root = media_root(&[]);
    let store = MemoryStore::new();
    let options = RunOptions {
        only: vec!["c".into(), "missing".into()],
        ..RunOptions::default()
    };
    let mut run = coordinator(&store, root.path(), options, CancellationToken::new());

    let report = run.run(&projects(&["a", "b", "c"]), |_| {}).await;

    assert_eq!(report.total, 1);
    assert_eq!(report.created, 1);
    assert_eq!(store.records(EntityKind::Project).len(), 1);
    assert!(store.record(EntityKind::Project, "c").is_some());
}

#[tokio::test]
async fn cancelled_before_start_touches_nothing() {
    let root = media_root(&[]);
    let store = MemoryStore::new();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut run = coordinator(&store, root.path(), RunOptions::default(), cancel);

    let report = run.run(&projects(&["a", "b"]), |_| {}).await;

    assert!(report.cancelled);
    assert_eq!(report.skipped, 2);
    assert_eq!(store.calls(), support::Calls::default());
}

#[tokio::test]
async fn cancellation_mid_run_keeps_committed_work() {
    let root = media_root(&[]);
    let store = MemoryStore::new();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let mut run = coordinator(&store, root.path(), RunOptions::default(), cancel);
    let mut started = Vec::new();

    let report = run
        .run(&projects(&["a", "b", "c"]), |event| {
            if let RunEvent::Started { slug, index, .. } = event {
                started.push(slug.to_owned());
                if index == 1 {
                    trigger.cancel();
                }
            }
        })
        .await;

    assert_eq!(started, vec!["a", "b"]);
    assert!(report.cancelled);
    assert_eq!(report.created, 1);
    assert_eq!(report.skipped, 2);
    assert!(report.failed.is_empty());
    assert!(store.record(EntityKind::Project, "a").is_some());
    assert!(store.record(EntityKind::Project, "b").is_none());
}

#[tokio::test]
async fn events_follow_outcomes() {
    let root = media_root(&[]);
    let store = MemoryStore::new();
    store.fail_writes_for(EntityKind::Project, "b");
    let mut run = coordinator(&store, root.path(), RunOptions::default(), CancellationToken::new());
    let mut outcomes = Vec::new();

    run.run(&projects(&["a", "b"]), |event| match event {
        RunEvent::Started { .. } => {}
        RunEvent::Succeeded(done) => outcomes.push(format!("ok:{}", done.slug)),
        RunEvent::Failed(failure) => outcomes.push(format!("err:{}", failure.slug)),
    })
    .await;

    assert_eq!(outcomes, vec!["ok:a", "err:b"]);
}
