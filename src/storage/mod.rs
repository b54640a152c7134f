//! Storage layer for the persisted session.
//!
//! The only state that outlives a run is the session token. It lives behind
//! the [`TokenStorage`] trait so the session store does not care whether it
//! is backed by a JSON file or by memory.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: Process-local implementation for tests and ephemeral profiles
//! - `models`: Storage record types separate from domain types

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::TokenStorage;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use models::SessionRecord;
