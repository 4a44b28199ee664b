//! Media uploads.

use std::path::Path;

use folio_core::{Asset, EntityKind};

use crate::RemoteClient;
use crate::error::RemoteError;
use crate::http::{check_response, read_json};
use crate::wire::UploadResponse;

/// Content type sent for a file, guessed from its extension.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

impl RemoteClient {
    pub(crate) async fn post_upload(&self, path: &Path) -> Result<Option<Asset>, RemoteError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RemoteError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let mime = mime_for(path);
        let url = &format!("{}/api/upload", self.base_url);
        let bytes = &bytes;
        let file_name = &file_name;

        let files: UploadResponse = self
            .retry
            .run_with("upload", RemoteError::is_resendable, move || async move {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)?;
                let form = reqwest::multipart::Form::new().part("files", part);
                let resp = self
                    .http
                    .post(url)
                    .bearer_auth(&self.token)
                    .multipart(form)
                    .send()
                    .await?;
                read_json(check_response(resp).await?, "upload response").await
            })
            .await
            .map_err(|e| e.into_write(EntityKind::Asset))?;

        let asset = files
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Parse("upload response was empty".to_string()))?;

        tracing::debug!(
            path = %path.display(),
            id = %asset.id,
            url = asset.url.as_deref().unwrap_or("-"),
            "uploaded file"
        );
        Ok(Some(asset))
    }
}
