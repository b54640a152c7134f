//! Remote collaborators: the gallery service and the identity provider.
//!
//! - `client`: the [`GalleryApi`] and [`IdentityProvider`] traits
//! - `http`: `reqwest` implementation against the live service
//! - `identity`: non-interactive identity providers
//! - `memory`: in-process gallery used offline and in tests

pub mod client;
pub mod http;
pub mod identity;
pub mod memory;

pub use client::{GalleryApi, IdentityProvider};
pub use http::HttpGalleryApi;
pub use identity::{EnvIdentityProvider, StaticIdentityProvider};
pub use memory::MemoryGallery;
