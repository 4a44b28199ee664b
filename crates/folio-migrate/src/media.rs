//! Media path normalization and upload deduplication.

use std::path::{Component, Path, PathBuf};

use folio_core::{MediaReference, RemoteId};
use folio_remote::{RemoteError, RemoteStore};
use serde::Serialize;

use crate::cache::MediaCache;
use crate::error::MigrateError;

/// Map a media reference onto a file below `root`.
///
/// The public URL prefix the site served media under is stripped first, then
/// any leading separators, so both `/media/projects/a.jpg` and `a.jpg` land on
/// `<root>/a.jpg`. `.` and `..` components are folded lexically; the result
/// never climbs above `root`.
#[must_use]
pub fn normalize_media_path(reference: &str, url_prefix: &str, root: &Path) -> PathBuf {
    let trimmed = reference.trim();
    let relative = if url_prefix.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(url_prefix).unwrap_or(trimmed)
    };
    let relative = relative.trim_start_matches(['/', '\\']);

    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    let mut path = root.to_path_buf();
    path.extend(parts);
    path
}

/// Outcome of resolving one media reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaResolution {
    /// The reference carried no path. No call was made.
    Empty,
    /// The referenced file does not exist.
    Missing(PathBuf),
    /// The file exists but the backend refused the upload.
    Rejected(PathBuf),
    /// The file is (now) a remote asset.
    Asset { id: RemoteId, uploaded: bool },
}

impl MediaResolution {
    #[must_use]
    pub fn asset_id(&self) -> Option<&RemoteId> {
        match self {
            Self::Asset { id, .. } => Some(id),
            Self::Empty | Self::Missing(_) | Self::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaStats {
    pub uploaded: usize,
    pub reused: usize,
    pub missing: usize,
    pub rejected: usize,
}

/// Uploads each distinct media file at most once per run.
#[derive(Debug)]
pub struct MediaDeduplicator {
    root: PathBuf,
    url_prefix: String,
    cache: MediaCache,
    stats: MediaStats,
}

impl MediaDeduplicator {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
            cache: MediaCache::new(),
            stats: MediaStats::default(),
        }
    }

    #[must_use]
    pub const fn stats(&self) -> MediaStats {
        self.stats
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `reference` to an asset id, uploading on first sight.
    ///
    /// # Errors
    ///
    /// [`MigrateError::MediaUpload`] when the file cannot be read or the
    /// backend is unavailable. A missing file or an upload refused with a 4xx
    /// is not an error and is never cached.
    pub async fn resolve<S>(
        &mut self,
        store: &S,
        reference: &MediaReference,
    ) -> Result<MediaResolution, MigrateError>
    where
        S: RemoteStore + ?Sized,
    {
        let Some(raw) = reference.path() else {
            return Ok(MediaResolution::Empty);
        };
        let path = normalize_media_path(raw, &self.url_prefix, &self.root);

        if let Some(id) = self.cache.get(&path) {
            self.stats.reused += 1;
            return Ok(MediaResolution::Asset {
                id: id.clone(),
                uploaded: false,
            });
        }

        let uploaded = match store.upload_file(&path).await {
            Ok(uploaded) => uploaded,
            Err(RemoteError::Write { status, body, .. }) if status < 500 => {
                tracing::warn!(
                    path = %path.display(),
                    status,
                    body,
                    "upload rejected, skipping"
                );
                self.stats.rejected += 1;
                return Ok(MediaResolution::Rejected(path));
            }
            Err(source) => {
                return Err(MigrateError::MediaUpload {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        match uploaded {
            Some(asset) => {
                tracing::info!(path = %path.display(), id = %asset.id, "uploaded media");
                self.cache.insert(path, asset.id.clone());
                self.stats.uploaded += 1;
                Ok(MediaResolution::Asset {
                    id: asset.id,
                    uploaded: true,
                })
            }
            None => {
                tracing::warn!(
                    path = %path.display(),
                    reference = raw,
                    "media file not found, skipping"
                );
                self.stats.missing += 1;
                Ok(MediaResolution::Missing(path))
            }
        }
    }
}
