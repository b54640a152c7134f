//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the session file and trace output live, and wires the
//! concrete collaborators (storage backend, gallery API, identity provider)
//! for a given [`Config`].

pub mod paths;

pub use paths::{data_dir, session_file, trace_file};

use crate::api::{EnvIdentityProvider, GalleryApi, HttpGalleryApi, IdentityProvider, MemoryGallery, StaticIdentityProvider};
use crate::domain::error::Result;
use crate::storage::{JsonStorage, MemoryStorage, TokenStorage};
use crate::Config;
use std::sync::Arc;

/// Identity used by the offline gallery's sign-in.
pub const OFFLINE_IDENTITY: &str = "offline-visitor";

/// Builds the session storage backend.
///
/// Offline runs keep the session in memory: tokens minted by the in-process
/// gallery mean nothing to a later run.
///
/// # Errors
///
/// Returns an error if the session file exists but cannot be read or parsed,
/// or its directory cannot be created.
pub fn build_storage(config: &Config) -> Result<Box<dyn TokenStorage>> {
    if config.offline {
        return Ok(Box::new(MemoryStorage::new()));
    }
    let path = session_file(config);
    tracing::debug!(path = %path.display(), "opening session file");
    Ok(Box::new(JsonStorage::new(path)?))
}

/// Builds the gallery API and the identity provider.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_collaborators(config: &Config) -> Result<(Arc<dyn GalleryApi>, Arc<dyn IdentityProvider>)> {
    if config.offline {
        tracing::info!("using the offline demo gallery");
        return Ok((
            Arc::new(MemoryGallery::demo()),
            Arc::new(StaticIdentityProvider::new(OFFLINE_IDENTITY)),
        ));
    }
    let api = HttpGalleryApi::new(config.api_url.clone(), config.request_timeout())?;
    Ok((Arc::new(api), Arc::new(EnvIdentityProvider)))
}
