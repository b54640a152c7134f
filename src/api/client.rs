//! Remote collaborator seams.
//!
//! The engine never calls the network directly. The worker drives these
//! traits, so the HTTP client, the offline gallery and test doubles are
//! interchangeable.

use crate::domain::error::Result;
use crate::domain::{IdentityAssertion, Image, ImageId, LikeState, ListRequest, SessionToken};
use async_trait::async_trait;

/// The gallery service.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    /// Fetches one page of images. `token` is optional; anonymous callers get
    /// `likedByMe` absent or false.
    async fn list_images(&self, request: &ListRequest, token: Option<&SessionToken>) -> Result<Vec<Image>>;

    /// Flips the caller's like on `id`.
    ///
    /// Returns the canonical state when the service reports one, `None` when
    /// the response carried nothing usable.
    async fn toggle_like(&self, id: &ImageId, token: &SessionToken) -> Result<Option<LikeState>>;

    /// Trades an identity-provider assertion for an application session token.
    async fn exchange_identity(&self, assertion: &IdentityAssertion) -> Result<SessionToken>;

    /// Images the caller has liked.
    async fn my_likes(&self, token: &SessionToken) -> Result<Vec<Image>>;
}

/// Source of identity assertions (the sign-in handshake).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self) -> Result<IdentityAssertion>;
}
