//! Process-local token storage.
//!
//! Used by tests and by the offline shell when no data directory should be
//! touched. Clones share the same slot, so a test can keep a handle and
//! inspect what the session store wrote.

use crate::domain::error::{GalleryError, Result};
use crate::storage::backend::TokenStorage;
use crate::storage::models::SessionRecord;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<SessionRecord>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `record`, as if a previous run
    /// had signed in.
    #[must_use]
    pub fn with_record(record: SessionRecord) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(record))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<SessionRecord>>> {
        self.slot
            .lock()
            .map_err(|e| GalleryError::Storage(format!("memory storage poisoned: {e}")))
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.lock()?.clone())
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        *self.lock()? = Some(record.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
