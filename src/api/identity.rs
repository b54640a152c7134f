//! Identity providers usable outside a browser.
//!
//! The real handshake is an interactive popup; a terminal client receives the
//! assertion out of band instead.

use super::client::IdentityProvider;
use crate::domain::error::{GalleryError, Result};
use crate::domain::IdentityAssertion;
use async_trait::async_trait;

pub const ID_TOKEN_ENV: &str = "GALLERY_ID_TOKEN";

/// Reads the assertion from `GALLERY_ID_TOKEN` at sign-in time.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvIdentityProvider;

#[async_trait]
impl IdentityProvider for EnvIdentityProvider {
    async fn sign_in(&self) -> Result<IdentityAssertion> {
        match std::env::var(ID_TOKEN_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(IdentityAssertion::new(value.trim())),
            _ => Err(GalleryError::Auth(format!("{ID_TOKEN_ENV} is not set"))),
        }
    }
}

/// Always answers with the same assertion, or always fails.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    assertion: Option<String>,
}

impl StaticIdentityProvider {
    pub fn new(assertion: impl Into<String>) -> Self {
        Self {
            assertion: Some(assertion.into()),
        }
    }

    /// A provider whose handshake is always dismissed.
    #[must_use]
    pub const fn failing() -> Self {
        Self { assertion: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn sign_in(&self) -> Result<IdentityAssertion> {
        self.assertion
            .as_deref()
            .map(IdentityAssertion::new)
            .ok_or_else(|| GalleryError::Auth("sign-in was cancelled".to_string()))
    }
}
