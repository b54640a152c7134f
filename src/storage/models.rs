//! Storage record models for the persistence layer.
//!
//! Record types are kept separate from the domain [`SessionToken`] so the
//! on-disk representation can carry bookkeeping the engine never reads.

use crate::domain::SessionToken;
use serde::{Deserialize, Serialize};

/// The persisted session, stored under the `user_token` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Bearer token issued by the gallery backend.
    pub user_token: SessionToken,

    /// Unix timestamp when the token was stored.
    pub saved_at: i64,
}

impl SessionRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_gallery::domain::SessionToken;
    /// use studio_gallery::storage::SessionRecord;
    ///
    /// let record = SessionRecord::new(SessionToken::new("t-1"));
    /// assert_eq!(record.user_token.expose(), "t-1");
    /// assert!(record.saved_at > 0);
    /// ```
    #[must_use]
    pub fn new(user_token: SessionToken) -> Self {
        Self {
            user_token,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}
