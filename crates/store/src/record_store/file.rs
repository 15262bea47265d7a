//! Single-file JSON backend.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{MissingRecordPolicy, StoreConfig, WriteMode};
use crate::error::StoreError;
use crate::record::Records;

use super::r#trait::RecordStore;

/// On-disk format revision written into every store file.
pub const FORMAT_VERSION: u32 = 1;

/// Borrowed view used when writing, so saving never clones the collection.
#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    format_version: u32,
    saved_at: DateTime<Utc>,
    records: &'a Records,
}

#[derive(Deserialize)]
struct StoreHeader {
    format_version: u32,
}

#[derive(Deserialize)]
struct StoreDocument {
    records: Records,
}

/// JSON-file record store.
///
/// The whole collection lives in a single file:
///
/// ```text
/// {
///   "format_version": 1,
///   "saved_at": "2024-01-01T00:00:00Z",
///   "records": { "<id>": { "kind": "customer", "payload": { ... } } }
/// }
/// ```
///
/// Every save rewrites the file in full. With [`WriteMode::Overwrite`] a crash
/// mid-write may leave the file truncated; [`WriteMode::Atomic`] writes a temp
/// file and renames it into place instead.
#[derive(Debug)]
pub struct FileStore {
    config: StoreConfig,
    writer: Mutex<()>,
}

impl FileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            writer: Mutex::new(()),
        }
    }

    /// File store at `path` with default write mode and missing-record policy.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::new(path))
    }

    /// File store configured from `RECORDKEEP_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(StoreConfig::from_env())
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .config
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.config.path.with_file_name(name)
    }

    fn encode(&self, records: &Records) -> Result<Vec<u8>, StoreError> {
        let document = StoreDocumentRef {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            records,
        };
        serde_json::to_vec_pretty(&document).map_err(|source| StoreError::EncodeDocument {
            path: self.config.path.clone(),
            source,
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Records, StoreError> {
        let path = &self.config.path;
        let corrupt = |source| StoreError::Corrupt {
            path: path.clone(),
            source,
        };

        let header: StoreHeader = serde_json::from_slice(bytes).map_err(corrupt)?;
        if header.format_version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: path.clone(),
                found: header.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let document: StoreDocument = serde_json::from_slice(bytes).map_err(corrupt)?;
        Ok(document.records)
    }

    fn write_in_place(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let path = &self.config.path;
        fs::write(path, bytes).map_err(|e| StoreError::io("write", path, e))
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let path = &self.config.path;
        let tmp = self.temp_path();

        let written = File::create(&tmp)
            .map_err(|e| StoreError::io("create", &tmp, e))
            .and_then(|mut file| {
                file.write_all(bytes)
                    .and_then(|_| file.sync_all())
                    .map_err(|e| StoreError::io("write", &tmp, e))
            })
            .and_then(|_| fs::rename(&tmp, path).map_err(|e| StoreError::io("rename", path, e)));

        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written
    }
}

impl RecordStore for FileStore {
    fn load_all(&self) -> Result<Records, StoreError> {
        let path = &self.config.path;
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file absent; starting empty");
                return Ok(Records::new());
            }
            Err(e) => return Err(StoreError::io("read", path, e)),
        };

        let records = self.decode(&bytes)?;
        tracing::debug!(path = %path.display(), records = records.len(), "loaded store");
        Ok(records)
    }

    fn save_all(&self, records: &Records) -> Result<(), StoreError> {
        let path = &self.config.path;
        let bytes = self.encode(records)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io("create directory for", parent, e))?;
        }

        match self.config.write_mode {
            WriteMode::Overwrite => self.write_in_place(&bytes)?,
            WriteMode::Atomic => self.write_atomic(&bytes)?,
        }

        tracing::debug!(
            path = %path.display(),
            records = records.len(),
            bytes = bytes.len(),
            mode = ?self.config.write_mode,
            "saved store"
        );
        Ok(())
    }

    fn writer_lock(&self) -> &Mutex<()> {
        &self.writer
    }

    fn missing_record_policy(&self) -> MissingRecordPolicy {
        self.config.missing_record
    }
}
