//! View mode and notice types for the application.
//!
//! [`ViewMode`] decides which list the view shows. [`Notice`] is the single
//! slot for recoverable, user-visible problems; none of them is fatal and each
//! is replaced by the next one or dismissed.

use std::fmt;

/// Which list is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// The paginated, searchable gallery.
    #[default]
    Gallery,

    /// Images the signed-in user has liked. Not paginated.
    Liked,
}

impl ViewMode {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Gallery => "Gallery",
            Self::Liked => "Liked",
        }
    }
}

/// Recoverable problem shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A like was attempted without a session. No request was made.
    AccessDenied,

    /// The liked view needs a session.
    SignInRequired,

    /// A gallery fetch failed; the previous list is still shown.
    FetchFailed(String),

    /// A like toggle failed and was rolled back.
    LikeFailed(String),

    /// The sign-in handshake or token exchange failed.
    AuthFailed(String),

    /// Loading the liked list failed.
    LikesFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessDenied => f.write_str("Access Denied: Please Login to Like"),
            Self::SignInRequired => f.write_str("Sign in to see your liked images"),
            Self::FetchFailed(reason) => write!(f, "Archive fetch failed: {reason}"),
            Self::LikeFailed(reason) => write!(f, "Registry update failed: {reason}"),
            Self::AuthFailed(reason) => write!(f, "Login failed: {reason}"),
            Self::LikesFailed(reason) => write!(f, "Could not load liked images: {reason}"),
        }
    }
}
