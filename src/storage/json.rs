//! JSON file-based token storage.
//!
//! Keeps the session in a small human-readable JSON file. Writes go to a
//! temporary file first and are renamed into place, so a crash never leaves a
//! half-written session behind.

use crate::domain::error::{GalleryError, Result};
use crate::storage::backend::TokenStorage;
use crate::storage::models::SessionRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// JSON storage container format.
///
/// ```json
/// {
///   "version": 1,
///   "user_token": { "user_token": "eyJ...", "saved_at": 1712345678 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    user_token: Option<SessionRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            user_token: None,
        }
    }
}

/// JSON file storage backend.
///
/// The whole file is cached in memory and rewritten on every change.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. The session store owns it exclusively.
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage file.
    ///
    /// Parent directories are created automatically. A missing file is an
    /// empty (signed-out) store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use studio_gallery::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/studio-gallery/session.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON token storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no session file yet, starting signed out");
            StorageData::default()
        };

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| GalleryError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(
            version = data.version,
            has_session = data.user_token.is_some(),
            "loaded session file"
        );

        Ok(data)
    }

    /// Writes the cached data to disk via temp file + rename.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| GalleryError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "session file saved");
        Ok(())
    }
}

impl TokenStorage for JsonStorage {
    fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.data.user_token.clone())
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        let _span = tracing::debug_span!("json_save_session", saved_at = record.saved_at).entered();

        self.data.user_token = Some(record.clone());
        self.dirty = true;
        self.save_to_file()
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_session").entered();

        if self.data.user_token.take().is_none() && self.file_path.exists() {
            tracing::trace!("session already absent");
            return Ok(());
        }

        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty session on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save session on drop");
            }
        }
    }
}
