//! File-backed storage emulating browser local storage.
//!
//! The file holds a JSON object mapping keys to string values, the same shape
//! as an origin's local storage:
//!
//! ```json
//! { "cart": "[{\"id\":\"k3j2h1x9z\",\"name\":\"Caftan A\",...}]" }
//! ```
//!
//! Writes replace the whole file atomically: the new object is written to a
//! `.tmp` sibling, synced, then renamed over the original.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{CartStorage, StorageError};

type Entries = BTreeMap<String, String>;

/// One key inside a JSON key/value file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    key: String,
}

impl FileStorage {
    /// Storage for `key` inside the file at `path`. The file is created on
    /// first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_entries(&self) -> Result<Option<Entries>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let encoded = serde_json::to_string_pretty(entries)?;
        let temp_path = self.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(encoded.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .read_entries()?
            .and_then(|mut entries| entries.remove(&self.key)))
    }

    fn save(&mut self, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Storage file unreadable, replacing it"
                );
                Entries::new()
            }
        };

        entries.insert(self.key.clone(), value.to_owned());
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), key = %self.key, bytes = value.len(), "Saved");
        Ok(())
    }
}
