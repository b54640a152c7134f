//! Session credentials and the hydration gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer token issued by the gallery backend.
///
/// The token is sensitive: `Debug` redacts it so it can never leak through
/// tracing fields or panic messages. Use [`SessionToken::expose`] where the
/// raw value is actually needed (HTTP headers, durable storage).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Identity assertion produced by the external identity provider.
///
/// Exchanged once for a [`SessionToken`]; never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityAssertion(String);

impl IdentityAssertion {
    pub fn new(assertion: impl Into<String>) -> Self {
        Self(assertion.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdentityAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityAssertion(<redacted>)")
    }
}

/// Two-state initialization gate for anything that depends on auth state.
///
/// Nothing auth-dependent renders and no fetch is scheduled until durable
/// storage has been read and the state moves to `Ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hydration {
    /// Durable storage has not been read yet.
    #[default]
    Uninitialized,
    /// Session state reflects durable storage.
    Ready,
}

impl Hydration {
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}
