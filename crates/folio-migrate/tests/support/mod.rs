//! In-memory [`RemoteStore`] for engine tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use folio_core::{Asset, EntityKind, RemoteEntity, RemoteId};
use folio_remote::{Page, RemoteError, RemoteStore};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Record {
    pub kind: EntityKind,
    pub id: RemoteId,
    pub fields: Value,
}

impl Record {
    pub fn slug(&self) -> Option<&str> {
        self.fields.get("slug").and_then(Value::as_str)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub lookups: usize,
    pub creates: usize,
    pub updates: usize,
    pub uploads: usize,
    pub lists: usize,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    records: Vec<Record>,
    uploaded: Vec<PathBuf>,
    calls: Calls,
    failing_writes: HashSet<(EntityKind, String)>,
    rejected_uploads: HashSet<String>,
    offline: bool,
}

impl State {
    fn allocate(&mut self) -> RemoteId {
        self.next_id += 1;
        RemoteId::from(self.next_id)
    }
}

/// Backend fake: records live in a vector, ids are sequential.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as if a previous run had created it.
    pub fn seed(&self, kind: EntityKind, slug: &str) -> RemoteId {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate();
        state.records.push(Record {
            kind,
            id: id.clone(),
            fields: serde_json::json!({ "slug": slug, "name": slug }),
        });
        id
    }

    /// Make creates and updates of `kind` with this slug fail with a 500.
    pub fn fail_writes_for(&self, kind: EntityKind, slug: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_writes
            .insert((kind, slug.to_owned()));
    }

    /// Refuse uploads of files with this name as an unsupported media type.
    pub fn reject_uploads_of(&self, file_name: &str) {
        self.state
            .lock()
            .unwrap()
            .rejected_uploads
            .insert(file_name.to_owned());
    }

    /// Make every call fail as an unreachable backend would.
    pub fn go_offline(&self) {
        self.state.lock().unwrap().offline = true;
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls
    }

    pub fn records(&self, kind: EntityKind) -> Vec<Record> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }

    pub fn record(&self, kind: EntityKind, slug: &str) -> Option<Record> {
        self.records(kind)
            .into_iter()
            .find(|r| r.slug() == Some(slug))
    }

    pub fn uploaded(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().uploaded.clone()
    }

    fn check_online(state: &State) -> Result<(), RemoteError> {
        if state.offline {
            Err(RemoteError::Api {
                status: 503,
                message: "backend unavailable".into(),
            })
        } else {
            Ok(())
        }
    }

    fn check_write(state: &State, kind: EntityKind, fields: &Value) -> Result<(), RemoteError> {
        let slug = fields.get("slug").and_then(Value::as_str).unwrap_or_default();
        if state.failing_writes.contains(&(kind, slug.to_owned())) {
            return Err(RemoteError::Write {
                kind,
                status: 500,
                body: "internal error".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn lookup_by_key(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> Result<Option<RemoteEntity>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.lookups += 1;
        Self::check_online(&state)?;
        Ok(state
            .records
            .iter()
            .find(|r| r.kind == kind && r.slug() == Some(key))
            .map(|r| RemoteEntity {
                id: r.id.clone(),
                slug: Some(key.to_owned()),
            }))
    }

    async fn create(&self, kind: EntityKind, fields: &Value) -> Result<RemoteEntity, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.creates += 1;
        Self::check_online(&state)?;
        Self::check_write(&state, kind, fields)?;
        let id = state.allocate();
        state.records.push(Record {
            kind,
            id: id.clone(),
            fields: fields.clone(),
        });
        Ok(RemoteEntity {
            id,
            slug: fields.get("slug").and_then(Value::as_str).map(str::to_owned),
        })
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &RemoteId,
        fields: &Value,
    ) -> Result<RemoteEntity, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.updates += 1;
        Self::check_online(&state)?;
        Self::check_write(&state, kind, fields)?;
        let record = state
            .records
            .iter_mut()
            .find(|r| r.kind == kind && &r.id == id)
            .ok_or(RemoteError::Write {
                kind,
                status: 404,
                body: "not found".into(),
            })?;
        record.fields = fields.clone();
        Ok(RemoteEntity {
            id: id.clone(),
            slug: fields.get("slug").and_then(Value::as_str).map(str::to_owned),
        })
    }

    async fn upload_file(&self, path: &Path) -> Result<Option<Asset>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.uploads += 1;
        Self::check_online(&state)?;
        if !path.exists() {
            return Ok(None);
        }
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        if name.is_some_and(|n| state.rejected_uploads.contains(&n)) {
            return Err(RemoteError::Write {
                kind: EntityKind::Asset,
                status: 415,
                body: "unsupported media type".into(),
            });
        }
        let id = state.allocate();
        state.uploaded.push(path.to_path_buf());
        state.records.push(Record {
            kind: EntityKind::Asset,
            id: id.clone(),
            fields: serde_json::json!({ "path": path.display().to_string() }),
        });
        Ok(Some(Asset {
            id,
            url: Some(format!("/uploads/{}", path.display())),
        }))
    }

    async fn list_page(&self, kind: EntityKind, limit: u32) -> Result<Page, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.lists += 1;
        Self::check_online(&state)?;
        let matching: Vec<_> = state.records.iter().filter(|r| r.kind == kind).collect();
        let total = matching.len() as u64;
        let entities = matching
            .into_iter()
            .take(limit as usize)
            .map(|r| RemoteEntity {
                id: r.id.clone(),
                slug: r.slug().map(str::to_owned),
            })
            .collect();
        Ok(Page {
            entities,
            total: Some(total),
        })
    }
}

/// A media root with the given files created empty.
pub fn media_root(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        let path = dir.path().join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"img").unwrap();
    }
    dir
}
