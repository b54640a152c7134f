//! Error types for the gallery client.
//!
//! This module defines the centralized error type [`GalleryError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Every variant maps onto a recovery category (see [`ErrorCategory`]). None
//! of them is fatal to the view: the worst outcome is a stale-but-consistent
//! view list plus a notice. A like attempted while signed out never becomes an
//! error; the handler turns it into a notice before any request is built.

use thiserror::Error;

/// The main error type for gallery client operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]`
/// for automatic conversion.
///
/// # Examples
///
/// ```
/// use studio_gallery::domain::{ErrorCategory, GalleryError};
///
/// let err = GalleryError::Auth("popup closed".to_string());
/// assert_eq!(err.category(), ErrorCategory::AuthFailure);
/// ```
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Identity handshake or token exchange failed.
    ///
    /// Recovered locally: the sign-in busy flag clears and no token is stored.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure talking to the gallery API.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The gallery API answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Durable session storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A background worker task failed to deliver its result.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// Recovery category of a [`GalleryError`].
///
/// Auth failures clear the sign-in flow; fetch failures preserve the last-good
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Identity handshake or token exchange failed.
    AuthFailure,
    /// List, like, or "my likes" request failed.
    FetchFailure,
    /// Local configuration, persistence, or runtime plumbing failed.
    Internal,
}

impl GalleryError {
    /// Returns the recovery category for this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Auth(_) => ErrorCategory::AuthFailure,
            Self::Network(_) | Self::Server { .. } | Self::Decode(_) => ErrorCategory::FetchFailure,
            Self::Storage(_)
            | Self::Io(_)
            | Self::Config(_)
            | Self::ConfigParse(_)
            | Self::Worker(_) => ErrorCategory::Internal,
        }
    }
}

/// A specialized `Result` type for gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
