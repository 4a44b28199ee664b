//! The capability set the migration engine needs from a content backend.

use std::path::Path;

use async_trait::async_trait;
use folio_core::{Asset, EntityKind, RemoteEntity, RemoteId};

use crate::error::RemoteError;
use crate::wire::Page;

/// Typed access to the remote entity collections.
///
/// Implemented by [`crate::RemoteClient`] over HTTP; tests provide in-memory
/// stores. Implementations do not cache and do not deduplicate.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Find the record of `kind` whose slug equals `key`.
    ///
    /// An empty result set is `Ok(None)`, not an error.
    async fn lookup_by_key(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> Result<Option<RemoteEntity>, RemoteError>;

    /// Create a record from `fields`.
    ///
    /// A non-success response is [`RemoteError::Write`].
    async fn create(
        &self,
        kind: EntityKind,
        fields: &serde_json::Value,
    ) -> Result<RemoteEntity, RemoteError>;

    /// Replace the fields of record `id`.
    ///
    /// A non-success response is [`RemoteError::Write`].
    async fn update(
        &self,
        kind: EntityKind,
        id: &RemoteId,
        fields: &serde_json::Value,
    ) -> Result<RemoteEntity, RemoteError>;

    /// Upload a local file.
    ///
    /// Returns `Ok(None)` when `path` does not exist on disk.
    async fn upload_file(&self, path: &Path) -> Result<Option<Asset>, RemoteError>;

    /// Fetch the first `limit` records of `kind`.
    async fn list_page(&self, kind: EntityKind, limit: u32) -> Result<Page, RemoteError>;
}

#[async_trait]
impl RemoteStore for crate::RemoteClient {
    async fn lookup_by_key(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> Result<Option<RemoteEntity>, RemoteError> {
        self.fetch_by_key(kind, key).await
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: &serde_json::Value,
    ) -> Result<RemoteEntity, RemoteError> {
        self.post_entity(kind, fields).await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &RemoteId,
        fields: &serde_json::Value,
    ) -> Result<RemoteEntity, RemoteError> {
        self.put_entity(kind, id, fields).await
    }

    async fn upload_file(&self, path: &Path) -> Result<Option<Asset>, RemoteError> {
        self.post_upload(path).await
    }

    async fn list_page(&self, kind: EntityKind, limit: u32) -> Result<Page, RemoteError> {
        self.fetch_page(kind, limit).await
    }
}
