//! Publish/subscribe channel for session changes.
//!
//! Components that depend on auth state subscribe here instead of listening
//! on an ambient global event. Each subscription gets its own unbounded
//! receiver and an id that can be handed back to [`SessionBus::unsubscribe`]
//! at teardown, so nothing keeps receiving after its owner is gone.

use crate::domain::SessionToken;
use tokio::sync::mpsc;

/// Notification published on every session mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The stored token changed. `None` means signed out.
    Changed { token: Option<SessionToken> },
}

/// Handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Default)]
pub struct SessionBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, mpsc::UnboundedSender<SessionEvent>)>,
}

impl SessionBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, tx));
        tracing::debug!(subscription = id.0, "session subscriber added");
        (id, rx)
    }

    /// Removes a subscriber. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        let removed = self.subscribers.len() != before;
        tracing::debug!(subscription = id.0, removed, "session subscriber removed");
        removed
    }

    /// Delivers `event` to every live subscriber.
    ///
    /// Subscribers whose receiver was dropped are pruned. Returns the number
    /// of subscribers that received the event.
    pub fn publish(&mut self, event: &SessionEvent) -> usize {
        self.subscribers.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        tracing::debug!(delivered = self.subscribers.len(), "session event published");
        self.subscribers.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
