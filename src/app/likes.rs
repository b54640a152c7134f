//! Ledger of optimistic like toggles awaiting confirmation.
//!
//! The first toggle on an image snapshots its like state. Further toggles
//! before the first settles only bump the in-flight count, so the snapshot
//! always describes what the server last confirmed. Each toggle also moves
//! the target, the state the user expects to see once the burst lands, so a
//! list fetched mid-burst can have it laid back on top. When the last toggle
//! settles the ledger says what to write back.

use crate::domain::{ImageId, LikeState};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLike {
    pub previous: LikeState,
    pub target: LikeState,
    pub in_flight: u32,
    pub failed: bool,
}

#[derive(Debug, Default, Clone)]
pub struct LikeLedger {
    pending: HashMap<ImageId, PendingLike>,
}

impl LikeLedger {
    /// Records a toggle about to be sent for `id`, whose state before the
    /// optimistic change is `current`. Returns the optimistic state to show.
    pub fn begin(&mut self, id: &ImageId, current: LikeState) -> LikeState {
        let target = current.toggled();
        let entry = self.pending.entry(id.clone()).or_insert(PendingLike {
            previous: current,
            target,
            in_flight: 0,
            failed: false,
        });
        entry.target = target;
        entry.in_flight += 1;
        target
    }

    /// A toggle succeeded.
    ///
    /// Returns `None` while other toggles for this image are in flight.
    /// Once the last one lands it returns the canonical state if the server
    /// sent one. Otherwise it returns the snapshot when an earlier toggle in
    /// the burst failed, or the optimistic target when none did.
    pub fn confirm(&mut self, id: &ImageId, canonical: Option<LikeState>) -> Option<LikeState> {
        let entry = self.pending.get_mut(id)?;
        entry.in_flight = entry.in_flight.saturating_sub(1);
        if entry.in_flight > 0 {
            return None;
        }
        let settled = self.pending.remove(id)?;
        let fallback = if settled.failed { settled.previous } else { settled.target };
        Some(canonical.unwrap_or(fallback))
    }

    /// A toggle failed. Returns the snapshot to restore once nothing else is
    /// in flight for this image.
    pub fn fail(&mut self, id: &ImageId) -> Option<LikeState> {
        let entry = self.pending.get_mut(id)?;
        entry.in_flight = entry.in_flight.saturating_sub(1);
        entry.failed = true;
        if entry.in_flight > 0 {
            return None;
        }
        self.pending.remove(id).map(|settled| settled.previous)
    }

    #[must_use]
    pub fn get(&self, id: &ImageId) -> Option<&PendingLike> {
        self.pending.get(id)
    }

    #[must_use]
    pub fn is_pending(&self, id: &ImageId) -> bool {
        self.pending.contains_key(id)
    }
}
