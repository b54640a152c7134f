//! Abortable one-shot timers.
//!
//! Each key holds at most one armed timer. Arming a key aborts whatever was
//! armed before. Every timer carries an id; if a timer fires but was replaced
//! or cancelled before its message was processed, [`TimerRegistry::fire`]
//! rejects it.

use super::Inbound;
use crate::app::Event;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Fetch,
    Pulse,
}

#[derive(Debug)]
struct ArmedTimer {
    id: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
pub struct TimerRegistry {
    next_id: u64,
    armed: HashMap<TimerKey, ArmedTimer>,
}

impl TimerRegistry {
    /// Arms `key` to deliver `event` after `delay`, replacing any armed timer.
    pub fn start(&mut self, key: TimerKey, delay: Duration, event: Event, tx: UnboundedSender<Inbound>) {
        self.cancel(key);
        self.next_id += 1;
        let id = self.next_id;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Inbound::Timer { key, id, event });
        });
        tracing::trace!(?key, id, delay_ms = delay.as_millis() as u64, "timer armed");
        self.armed.insert(key, ArmedTimer { id, handle });
    }

    /// Aborts the timer armed under `key`. Returns whether one was armed.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        match self.armed.remove(&key) {
            Some(timer) => {
                timer.handle.abort();
                tracing::trace!(?key, id = timer.id, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Accepts a fired timer if it is still the one armed under `key`.
    pub fn fire(&mut self, key: TimerKey, id: u64) -> bool {
        if self.armed.get(&key).is_some_and(|timer| timer.id == id) {
            self.armed.remove(&key);
            true
        } else {
            tracing::trace!(?key, id, "fired timer was already replaced");
            false
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, timer) in self.armed.drain() {
            timer.handle.abort();
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
