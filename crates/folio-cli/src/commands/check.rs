use anyhow::Context;
use folio_config::FolioConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared;
use crate::output::output;
use crate::progress::Spinner;

#[derive(Debug, Serialize)]
struct CheckResponse {
    base_url: String,
    backend: &'static str,
    existing_projects: Option<u64>,
    content_file: String,
    export_projects: usize,
    media_dir: String,
    media_dir_exists: bool,
}

/// Handle `folio check`.
pub async fn handle(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = shared::connect(config)?;
    let projects = shared::load_projects(config)?;

    let spinner = Spinner::start("checking backend");
    let existing_projects = match folio_migrate::preflight(&client)
        .await
        .with_context(|| format!("cannot reach backend at {}", client.base_url()))
    {
        Ok(total) => {
            spinner.clear();
            total
        }
        Err(error) => {
            spinner.fail("backend unreachable");
            return Err(error);
        }
    };

    let media_dir = &config.source.media_dir;
    if !media_dir.is_dir() {
        tracing::warn!(
            path = %media_dir.display(),
            "media directory does not exist; every media reference will be skipped"
        );
    }

    output(
        &CheckResponse {
            base_url: client.base_url().to_string(),
            backend: "ok",
            existing_projects,
            content_file: config.source.content_file.display().to_string(),
            export_projects: projects.len(),
            media_dir: media_dir.display().to_string(),
            media_dir_exists: media_dir.is_dir(),
        },
        flags.format,
    )
}
