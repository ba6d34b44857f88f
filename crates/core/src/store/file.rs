//! File-backed document store.
//!
//! Each document lives in its own sharded directory:
//!
//! ```text
//! <data_dir>/<collection>/
//!   <s1>/
//!     <s2>/
//!       <id>/
//!         document.json
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the id. The JSON file wraps the
//! document in an envelope recording when it was first stored, which is how listing restores
//! creation order after walking the directory tree.

use super::{Document, DocumentStore, Filter};
use crate::config::CoreConfig;
use crate::constants::DOCUMENT_JSON_FILENAME;
use crate::{RecordError, RecordResult};
use async_trait::async_trait;
use burrow_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument<D> {
    created_at: DateTime<Utc>,
    document: D,
}

pub struct FileStore<D> {
    root: PathBuf,
    _documents: PhantomData<fn() -> D>,
}

impl<D: Document> FileStore<D> {
    /// Opens (creating if needed) the collection directory for `D` under the configured data
    /// directory.
    pub fn open(cfg: &CoreConfig) -> RecordResult<Self> {
        Self::at(cfg.collection_dir(D::COLLECTION))
    }

    /// Opens a store rooted at an explicit directory.
    pub fn at(root: PathBuf) -> RecordResult<Self> {
        fs::create_dir_all(&root).map_err(RecordError::StorageDirCreation)?;
        Ok(Self {
            root,
            _documents: PhantomData,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn document_path(root: &Path, id: &RecordId) -> PathBuf {
    id.sharded_dir(root).join(DOCUMENT_JSON_FILENAME)
}

fn read_stored<D: Document>(path: &Path) -> RecordResult<Option<StoredDocument<D>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(RecordError::FileRead(e)),
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(RecordError::Deserialization)
}

fn write_stored<D: Document>(path: &Path, stored: &StoredDocument<D>) -> RecordResult<()> {
    let parent = path
        .parent()
        .ok_or_else(|| RecordError::Inconsistent(format!("{} has no parent", path.display())))?;
    fs::create_dir_all(parent).map_err(RecordError::StorageDirCreation)?;

    let raw = serde_json::to_vec_pretty(stored).map_err(RecordError::Serialization)?;
    // One temp file per write; concurrent saves of an id must not share it.
    let mut tmp = NamedTempFile::new_in(parent).map_err(RecordError::FileWrite)?;
    tmp.write_all(&raw).map_err(RecordError::FileWrite)?;
    tmp.persist(path).map_err(|e| RecordError::FileWrite(e.error))?;
    Ok(())
}

fn remove_document_dir(root: &Path, id: &RecordId) -> RecordResult<()> {
    match fs::remove_dir_all(id.sharded_dir(root)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RecordError::FileRemove(e)),
    }
}

fn subdirs(path: &Path) -> Vec<PathBuf> {
    match fs::read_dir(path) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Walks `<root>/<s1>/<s2>/<id>/document.json` and returns documents oldest first.
///
/// Files that cannot be parsed are logged and skipped.
fn load_all<D: Document>(root: &Path) -> Vec<StoredDocument<D>> {
    let mut stored = Vec::new();

    for s1 in subdirs(root) {
        for s2 in subdirs(&s1) {
            for id_dir in subdirs(&s2) {
                let path = id_dir.join(DOCUMENT_JSON_FILENAME);
                if !path.is_file() {
                    continue;
                }
                match read_stored::<D>(&path) {
                    Ok(Some(doc)) => stored.push(doc),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("skipping unreadable document {}: {}", path.display(), e)
                    }
                }
            }
        }
    }

    stored.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.document.id().cmp(&b.document.id()))
    });
    stored
}

#[async_trait]
impl<D: Document> DocumentStore<D> for FileStore<D> {
    async fn find(&self, filter: &Filter<D>) -> RecordResult<Vec<D>> {
        let root = self.root.clone();
        let stored = tokio::task::spawn_blocking(move || load_all::<D>(&root)).await?;
        Ok(stored
            .into_iter()
            .map(|s| s.document)
            .filter(|d| filter.matches(d))
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RecordResult<Option<D>> {
        let Ok(id) = RecordId::parse(id) else {
            return Ok(None);
        };
        let path = document_path(&self.root, &id);
        let stored = tokio::task::spawn_blocking(move || read_stored::<D>(&path)).await??;
        Ok(stored.map(|s| s.document))
    }

    async fn save(&self, mut document: D) -> RecordResult<D> {
        let id = document.assign_ids();
        let path = document_path(&self.root, &id);
        tracing::debug!("file store: saving {}", path.display());

        let to_write = document.clone();
        tokio::task::spawn_blocking(move || -> RecordResult<()> {
            let created_at = read_stored::<D>(&path)?
                .map(|existing| existing.created_at)
                .unwrap_or_else(Utc::now);
            write_stored(
                &path,
                &StoredDocument {
                    created_at,
                    document: to_write,
                },
            )
        })
        .await??;

        Ok(document)
    }

    async fn delete_by_id(&self, id: &str) -> RecordResult<Option<D>> {
        let Ok(id) = RecordId::parse(id) else {
            return Ok(None);
        };
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || -> RecordResult<Option<D>> {
            let stored = read_stored::<D>(&document_path(&root, &id))?;
            if stored.is_some() {
                remove_document_dir(&root, &id)?;
            }
            Ok(stored.map(|s| s.document))
        })
        .await?
    }

    async fn delete_all(&self, filter: &Filter<D>) -> RecordResult<u64> {
        let ids: Vec<RecordId> = self
            .find(filter)
            .await?
            .iter()
            .filter_map(|d| d.id().cloned())
            .collect();

        let root = self.root.clone();
        tokio::task::spawn_blocking(move || -> RecordResult<u64> {
            for id in &ids {
                remove_document_dir(&root, id)?;
            }
            Ok(ids.len() as u64)
        })
        .await?
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
