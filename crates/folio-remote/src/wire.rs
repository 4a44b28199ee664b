//! Response envelopes of the content API.

use folio_core::{Asset, RemoteEntity};
use serde::{Deserialize, Serialize};

/// `{ "data": [...], "meta": { "pagination": {...} } }`
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub data: Vec<RemoteEntity>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListMeta {
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pagination {
    pub total: Option<u64>,
}

/// `{ "data": {...} }` returned by create and update.
#[derive(Debug, Deserialize)]
pub(crate) struct SingleResponse {
    pub data: RemoteEntity,
}

/// Request body envelope for create and update.
#[derive(Debug, Serialize)]
pub(crate) struct WriteEnvelope<'a> {
    pub data: &'a serde_json::Value,
}

/// The upload endpoint answers with a bare array of files.
pub(crate) type UploadResponse = Vec<Asset>;

/// One page of a collection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub entities: Vec<RemoteEntity>,
    /// Total records in the collection, when the backend reports it.
    pub total: Option<u64>,
}

impl From<ListResponse> for Page {
    fn from(list: ListResponse) -> Self {
        let total = list
            .meta
            .and_then(|meta| meta.pagination)
            .and_then(|pagination| pagination.total);
        Self {
            entities: list.data,
            total,
        }
    }
}
