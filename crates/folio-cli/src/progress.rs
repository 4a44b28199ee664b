//! Terminal feedback for `check` and `migrate`.
//!
//! Both types are inert when progress display is off (quiet, JSON output or
//! a non-terminal stderr).

use std::time::Duration;

use folio_migrate::{RunEvent, RunReport, UpsertAction};
use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Spinner shown while waiting on a single backend call.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    #[must_use]
    pub fn start(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self(None);
        }
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self(Some(bar))
    }

    pub fn clear(&self) {
        if let Some(bar) = &self.0 {
            bar.finish_and_clear();
        }
    }

    pub fn fail(&self, message: &str) {
        if let Some(bar) = &self.0 {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Per-project bar driven by [`RunEvent`]s.
///
/// The prefix carries running created/updated/failed counts; failures are
/// printed above the bar as they happen.
pub struct RunProgress {
    bar: Option<ProgressBar>,
    created: usize,
    updated: usize,
    failed: usize,
}

fn run_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols < 80 => "{wide_bar:.cyan/blue} {percent}% {msg}",
        _ => "{bar:30.cyan/blue} {pos}/{len} {prefix} {msg}",
    }
}

impl RunProgress {
    #[must_use]
    pub fn new(total: usize) -> Self {
        if !ui::prefs().progress {
            return Self::with_bar(None);
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template(run_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self::with_bar(Some(bar))
    }

    fn with_bar(bar: Option<ProgressBar>) -> Self {
        Self {
            bar,
            created: 0,
            updated: 0,
            failed: 0,
        }
    }

    pub fn observe(&mut self, event: RunEvent<'_>) {
        match event {
            RunEvent::Started { slug, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_message(slug.to_string());
                }
                return;
            }
            RunEvent::Succeeded(project) => match project.action {
                UpsertAction::Created => self.created += 1,
                UpsertAction::Updated => self.updated += 1,
            },
            RunEvent::Failed(failure) => {
                self.failed += 1;
                if let Some(bar) = &self.bar {
                    bar.println(format!(
                        "failed {} at {}: {}",
                        failure.slug,
                        failure.step.as_str(),
                        failure.message
                    ));
                }
            }
        }
        if let Some(bar) = &self.bar {
            bar.inc(1);
            bar.set_prefix(self.counts());
        }
    }

    fn counts(&self) -> String {
        format!("+{} ~{} !{}", self.created, self.updated, self.failed)
    }

    pub fn finish(&self, report: &RunReport) {
        let Some(bar) = &self.bar else {
            return;
        };
        if report.cancelled {
            bar.abandon_with_message("cancelled");
        } else if report.failed.is_empty() {
            bar.finish_with_message("done");
        } else {
            bar.abandon_with_message("finished with failures");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_migrate::{ProjectFailure, Step};
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_only_finished_projects() {
        let mut progress = RunProgress::with_bar(Some(ProgressBar::hidden()));
        let failure = ProjectFailure {
            slug: "p2".into(),
            step: Step::Tag,
            message: "tag write rejected (500)".into(),
        };

        progress.observe(RunEvent::Started {
            slug: "p1",
            index: 0,
            total: 2,
        });
        progress.observe(RunEvent::Failed(&failure));

        let bar = progress.bar.as_ref().unwrap();
        assert_eq!(bar.position(), 1);
        assert_eq!(bar.prefix(), "+0 ~0 !1");
        assert_eq!(progress.failed, 1);
    }

    #[test]
    fn disabled_progress_still_counts() {
        let mut progress = RunProgress::with_bar(None);
        let failure = ProjectFailure {
            slug: "p1".into(),
            step: Step::ProjectCreate,
            message: String::new(),
        };
        progress.observe(RunEvent::Failed(&failure));
        assert_eq!(progress.counts(), "+0 ~0 !1");
    }
}
