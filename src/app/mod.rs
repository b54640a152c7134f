//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the async runtime and the domain/session/worker
//! layers. It is a pure state machine: it never awaits and never performs
//! I/O.
//!
//! # Architecture
//!
//! ```text
//! User intent → Events → Event Handler → State Mutations → Actions → Side Effects
//!                            ↑                                  ↓
//!                            └── Timers, Session bus, Worker ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View mode and notice types
//! - [`state`]: Central application state container and view model computation
//! - [`fetch`]: Debounce generations and request ordering
//! - [`likes`]: Optimistic like ledger
//! - [`gesture`]: Double-tap recognition

pub mod actions;
pub mod fetch;
pub mod gesture;
pub mod handler;
pub mod likes;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use gesture::GestureScope;
pub use handler::{handle_event, Event};
pub use modes::{Notice, ViewMode};
pub use state::AppState;
