//! Background worker for asynchronous network operations.
//!
//! The engine never awaits. Every remote call is described as a
//! [`WorkerMessage`], executed on a spawned task by [`GalleryWorker`], and
//! answered with a [`WorkerResponse`] that re-enters the engine as an event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::GalleryWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
