//! Flat-file persistence for the [`Document`].
//!
//! Nothing is cached between calls: every read goes back to disk and every write rewrites the
//! whole file. Mutations should go through [`DocumentStore::update`], which serializes
//! load -> mutate -> save behind a single writer lock. Calling [`DocumentStore::load`] and
//! [`DocumentStore::save`] directly bypasses that lock and the later save wins.
//!
//! A file that is valid JSON but does not fit the [`Document`] shape is never written over:
//! [`DocumentStore::update`] fails with [`StoreError::Incompatible`] instead.

use crate::domain::model::Document;
use serde_json::Value as JsonValue;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} does not hold a compatible document: {source}", path.display())]
    Incompatible {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct DocumentStore {
    path: PathBuf,
    /// Single-writer lock covering the whole load -> mutate -> save sequence.
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document from disk with defaults applied.
    ///
    /// A missing file, bytes that are not JSON at all, or a top-level `null` read as an empty
    /// document. An unreadable file or JSON of the wrong shape is an error.
    pub async fn read(&self) -> Result<Document, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no document on disk yet");
                return Ok(Document::default().with_defaults());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value = match serde_json::from_slice::<JsonValue>(&bytes) {
            Ok(JsonValue::Null) => JsonValue::Object(Default::default()),
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "document is not JSON, using an empty document");
                return Ok(Document::default().with_defaults());
            }
        };

        serde_json::from_value::<Document>(value)
            .map(Document::with_defaults)
            .map_err(|source| StoreError::Incompatible {
                path: self.path.clone(),
                source,
            })
    }

    /// Like [`read`](Self::read), but never fails: any error reads as an empty document.
    pub async fn load(&self) -> Document {
        match self.read().await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "using an empty document");
                Document::default().with_defaults()
            }
        }
    }

    /// Rewrites the whole file with `doc` (temp file + rename).
    pub async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }

    /// Loads the document, applies `mutate`, and saves the result if `mutate` succeeded.
    ///
    /// An `Err` from `mutate` leaves the file untouched, as does a file [`read`](Self::read)
    /// rejects.
    pub async fn update<T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read().await?;
        let out = mutate(&mut doc)?;
        self.save(&doc).await?;
        Ok(out)
    }

    /// Materializes defaults on disk. Called once at startup.
    pub async fn init(&self) -> Result<Document, StoreError> {
        self.update(|doc| Ok::<_, StoreError>(doc.clone())).await
    }
}
