//! JSON-file session storage for command-line use.
//!
//! # Design
//! - The file is a flat JSON object of string values, mirroring browser storage.
//! - Every mutation rewrites the whole map through an owner-only temp file
//!   and a rename.
//! - A missing file reads as an empty session.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

use super::{SessionStore, SessionStoreError};

type Entries = BTreeMap<String, String>;

/// Session storage persisted to a JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store backed by `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn read_entries(&self) -> Result<Entries, SessionStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(SessionStoreError::Io {
                    operation: "read",
                    path: self.display_path(),
                    source,
                });
            }
        };
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&contents).map_err(|source| SessionStoreError::Corrupt {
            path: self.display_path(),
            source,
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), SessionStoreError> {
        let io_error = |operation| {
            let path = self.display_path();
            move |source| SessionStoreError::Io {
                operation,
                path,
                source,
            }
        };

        let parent = match self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(io_error("create_dir"))?;
                parent
            }
            None => Path::new("."),
        };
        let payload = serde_json::to_vec_pretty(entries).map_err(|source| {
            SessionStoreError::Corrupt {
                path: self.display_path(),
                source,
            }
        })?;
        // Staging files are created owner-only (0600 on unix).
        let mut staging = NamedTempFile::new_in(parent).map_err(io_error("create"))?;
        staging.write_all(&payload).map_err(io_error("write"))?;
        staging
            .persist(&self.path)
            .map_err(|err| io_error("rename")(err.error))?;
        debug!(path = %self.path.display(), keys = entries.len(), "session file updated");
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<(), SessionStoreError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let _guard = self.lock.lock().map_err(|_| SessionStoreError::Poisoned)?;
        let mut entries = self.read_entries()?;
        if mutate(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let _guard = self.lock.lock().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}
