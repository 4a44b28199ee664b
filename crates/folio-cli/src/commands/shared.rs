use std::time::Duration;

use anyhow::Context;
use folio_config::FolioConfig;
use folio_core::SourceProject;
use folio_remote::{ClientOptions, RemoteClient, RetryPolicy};

/// Build the HTTP client from validated remote settings.
pub fn connect(config: &FolioConfig) -> anyhow::Result<RemoteClient> {
    config.remote.validate()?;
    let token = config.remote.require_token()?;

    let options = ClientOptions {
        timeout: Duration::from_secs(config.remote.timeout_secs),
        retry: RetryPolicy::default().with_max_retries(config.remote.max_retries),
        ..ClientOptions::new(config.remote.base_url.trim(), token)
    };
    RemoteClient::new(options).context("failed to build HTTP client")
}

/// Read and validate the project export.
pub fn load_projects(config: &FolioConfig) -> anyhow::Result<Vec<SourceProject>> {
    let path = &config.source.content_file;
    let projects = folio_core::export::read_export(path)
        .with_context(|| format!("failed to load export {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = projects.len(), "loaded export");
    Ok(projects)
}
