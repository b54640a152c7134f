//! HTTP implementation of [`GalleryApi`] on top of `reqwest`.

use super::client::GalleryApi;
use crate::domain::error::{GalleryError, Result};
use crate::domain::{IdentityAssertion, Image, ImageId, LikeState, ListRequest, SessionToken};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ExchangeRequest<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    token: String,
}

#[derive(Clone)]
pub struct HttpGalleryApi {
    client: Client,
    base_url: String,
}

impl HttpGalleryApi {
    /// Builds a client against `base_url` (no trailing slash needed).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(builder: RequestBuilder, token: Option<&SessionToken>) -> RequestBuilder {
        match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token.expose())),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "request rejected by server");
        Err(GalleryError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode_images(response: Response) -> Result<Vec<Image>> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| GalleryError::Decode(e.to_string()))
    }
}

/// Reads whatever canonical like state a toggle response carries.
///
/// The service may answer with an empty body, a bare status, or an image
/// document; anything that does not hold both fields yields `None`.
fn parse_like_body(body: &[u8]) -> Option<LikeState> {
    serde_json::from_slice::<LikeState>(body).ok()
}

#[async_trait]
impl GalleryApi for HttpGalleryApi {
    async fn list_images(&self, request: &ListRequest, token: Option<&SessionToken>) -> Result<Vec<Image>> {
        tracing::debug!(
            search = %request.search,
            sort = %request.sort,
            page = request.page,
            limit = request.limit,
            "GET /images"
        );
        let builder = self.client.get(self.url("/images")).query(&request.query_pairs());
        let response = Self::authorized(builder, token).send().await?;
        Self::decode_images(Self::check(response).await?).await
    }

    async fn toggle_like(&self, id: &ImageId, token: &SessionToken) -> Result<Option<LikeState>> {
        tracing::debug!(image_id = %id, "POST /images/:id/like");
        let builder = self.client.post(self.url(&format!("/images/{id}/like")));
        let response = Self::authorized(builder, Some(token)).send().await?;
        let body = Self::check(response).await?.bytes().await?;
        Ok(parse_like_body(&body))
    }

    async fn exchange_identity(&self, assertion: &IdentityAssertion) -> Result<SessionToken> {
        tracing::debug!("POST /api/auth/google");
        let response = self
            .client
            .post(self.url("/api/auth/google"))
            .json(&ExchangeRequest { id_token: assertion.expose() })
            .send()
            .await?;
        let response = Self::check(response)
            .await
            .map_err(|e| GalleryError::Auth(e.to_string()))?;
        let body = response.bytes().await?;
        let parsed: ExchangeResponse =
            serde_json::from_slice(&body).map_err(|e| GalleryError::Auth(format!("bad exchange response: {e}")))?;
        Ok(SessionToken::new(parsed.token))
    }

    async fn my_likes(&self, token: &SessionToken) -> Result<Vec<Image>> {
        tracing::debug!("GET /auth/me/likes");
        let builder = self.client.get(self.url("/auth/me/likes"));
        let response = Self::authorized(builder, Some(token)).send().await?;
        Self::decode_images(Self::check(response).await?).await
    }
}
