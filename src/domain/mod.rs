//! Domain layer for the gallery client.
//!
//! This module contains the core domain types, independent of the HTTP client,
//! the tokio runtime, and the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types, recovery categories, and result alias
//! - [`image`]: Image records and like state
//! - [`query`]: Search/sort/page query state with its page-reset rule
//! - [`session`]: Session token, identity assertion, hydration gate

pub mod error;
pub mod image;
pub mod query;
pub mod session;

pub use error::{ErrorCategory, GalleryError, Result};
pub use image::{Image, ImageId, LikeState};
pub use query::{ListRequest, QueryState, SortMode, PAGE_SIZE};
pub use session::{Hydration, IdentityAssertion, SessionToken};
