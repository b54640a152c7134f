//! Storage backend abstraction.
//!
//! This module defines the [`TokenStorage`] trait that abstracts over where
//! the session token lives between runs. The session store only needs three
//! operations, so the trait stays that small.

use crate::domain::error::Result;
use crate::storage::models::SessionRecord;

/// Durable home of the session token.
///
/// Absence of a record means "signed out". Implementations must make a stored
/// record visible to a later [`load`](TokenStorage::load) from a fresh
/// instance pointing at the same location.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local, for tests
pub trait TokenStorage: Send {
    /// Reads the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<SessionRecord>>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, record: &SessionRecord) -> Result<()>;

    /// Removes the stored session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear(&mut self) -> Result<()>;
}
