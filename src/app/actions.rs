//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never sleeps, spawns, or touches storage. It returns a
//! `Vec<Action>` describing what should happen, and the runtime executes the
//! list in order after the handler returns.

use crate::domain::SessionToken;
use crate::worker::WorkerMessage;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arms the debounce timer, replacing any armed one. When it fires the
    /// runtime dispatches `Event::DebounceElapsed { generation }`.
    ScheduleFetch { generation: u64, delay: Duration },

    /// Aborts the armed debounce timer, if any.
    CancelScheduledFetch,

    /// Runs a request on the background worker.
    PostToWorker(WorkerMessage),

    /// Arms the pulse timer. Fires `Event::PulseElapsed { generation }`.
    SchedulePulseClear { generation: u64, delay: Duration },

    /// Persists a new session through the session store.
    StoreSession(SessionToken),

    /// Clears the persisted session.
    ClearSession,
}
