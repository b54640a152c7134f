//! Session store: current bearer token plus its durable mirror.
//!
//! The store never talks to the network. It keeps the token in memory,
//! writes every change through to [`TokenStorage`], and publishes a
//! [`SessionEvent`] on its [`SessionBus`] after each mutation.

use super::bus::{SessionBus, SessionEvent, SubscriptionId};
use crate::domain::error::Result;
use crate::domain::{Hydration, SessionToken};
use crate::storage::{SessionRecord, TokenStorage};
use tokio::sync::mpsc;

pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
    token: Option<SessionToken>,
    hydration: Hydration,
    bus: SessionBus,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        Self {
            storage,
            token: None,
            hydration: Hydration::Uninitialized,
            bus: SessionBus::new(),
        }
    }

    /// Reads durable storage and marks the store ready.
    ///
    /// Hydration does not publish: nothing changed from the point of view of
    /// a subscriber. An unreadable store hydrates as signed out; the error is
    /// logged rather than returned so a corrupt file cannot wedge startup.
    pub fn hydrate(&mut self) -> Option<SessionToken> {
        let _span = tracing::debug_span!("session_hydrate").entered();

        self.token = match self.storage.load() {
            Ok(record) => record.map(|r| r.user_token),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored session, starting signed out");
                None
            }
        };
        self.hydration = Hydration::Ready;

        tracing::debug!(signed_in = self.token.is_some(), "session hydrated");
        self.token.clone()
    }

    #[must_use]
    pub const fn hydration(&self) -> Hydration {
        self.hydration
    }

    #[must_use]
    pub const fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Stores a new token, persists it, and notifies subscribers.
    ///
    /// The in-memory token and the notification happen even if persisting
    /// fails; the write error is returned so the caller can log it.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the durable write fails.
    pub fn set_token(&mut self, token: SessionToken) -> Result<()> {
        let _span = tracing::debug_span!("session_set_token").entered();

        let persisted = self.storage.save(&SessionRecord::new(token.clone()));
        self.token = Some(token);
        self.bus.publish(&SessionEvent::Changed { token: self.token.clone() });
        persisted
    }

    /// Drops the token, clears durable storage, and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the durable clear fails.
    pub fn clear_token(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("session_clear_token").entered();

        let cleared = self.storage.clear();
        self.token = None;
        self.bus.publish(&SessionEvent::Changed { token: None });
        cleared
    }

    pub fn subscribe(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<SessionEvent>) {
        self.bus.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }
}
