//! Bookkeeping for gallery fetches.
//!
//! Two counters keep fetches honest:
//!
//! - the **debounce generation** identifies the most recent scheduled fetch;
//!   a timer that fires for an older generation is ignored.
//! - the **sequence number** orders issued requests; a response is applied
//!   only if it is newer than the last one applied, so a slow early request
//!   can never overwrite a fast later one.
//!
//! The in-flight set drives the loading flag. Every completion leaves the
//! set, whether it was applied, failed, or discarded as stale.

use std::collections::BTreeSet;

/// What to do with a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Newer than anything applied so far.
    Fresh,
    /// Superseded by a later request that already completed.
    Stale,
}

#[derive(Debug, Default, Clone)]
pub struct FetchTracker {
    debounce_generation: u64,
    pending: Option<u64>,
    next_seq: u64,
    applied_seq: u64,
    in_flight: BTreeSet<u64>,
}

impl FetchTracker {
    /// Starts a new debounce window and returns its generation.
    pub fn schedule(&mut self) -> u64 {
        self.debounce_generation += 1;
        self.pending = Some(self.debounce_generation);
        self.debounce_generation
    }

    /// Forgets the scheduled fetch, if any. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Claims the scheduled fetch if `generation` is still the current one.
    pub fn take_if_current(&mut self, generation: u64) -> bool {
        if self.pending == Some(generation) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Allocates the sequence number for a request about to be sent.
    pub fn issue(&mut self) -> u64 {
        self.next_seq += 1;
        self.in_flight.insert(self.next_seq);
        self.next_seq
    }

    /// Records that request `seq` finished, successfully or not.
    ///
    /// A fresh completion, failure included, becomes the new high-water mark,
    /// so an older success arriving afterwards is stale.
    pub fn complete(&mut self, seq: u64) -> Completion {
        self.in_flight.remove(&seq);
        if seq > self.applied_seq {
            self.applied_seq = seq;
            Completion::Fresh
        } else {
            Completion::Stale
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    #[must_use]
    pub const fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_generation_fires() {
        let mut tracker = FetchTracker::default();
        let first = tracker.schedule();
        let second = tracker.schedule();

        assert!(!tracker.take_if_current(first));
        assert!(tracker.take_if_current(second));
        assert!(!tracker.take_if_current(second));
    }

    #[test]
    fn cancelled_generation_does_not_fire() {
        let mut tracker = FetchTracker::default();
        let generation = tracker.schedule();

        assert!(tracker.cancel_pending());
        assert!(!tracker.take_if_current(generation));
        assert!(!tracker.cancel_pending());
    }

    #[test]
    fn out_of_order_completion_is_stale() {
        let mut tracker = FetchTracker::default();
        let early = tracker.issue();
        let late = tracker.issue();
        assert!(tracker.is_loading());

        assert_eq!(tracker.complete(late), Completion::Fresh);
        assert!(tracker.is_loading());
        assert_eq!(tracker.complete(early), Completion::Stale);
        assert!(!tracker.is_loading());
        assert_eq!(tracker.applied_seq(), late);
    }

    #[test]
    fn failure_still_advances_high_water_mark() {
        let mut tracker = FetchTracker::default();
        let early = tracker.issue();
        let late = tracker.issue();

        assert_eq!(tracker.complete(late), Completion::Fresh);
        assert_eq!(tracker.complete(early), Completion::Stale);
    }
}
