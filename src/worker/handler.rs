//! Background worker for network operations.
//!
//! The worker owns the remote collaborators and turns each [`WorkerMessage`]
//! into exactly one [`WorkerResponse`]. It never touches engine state; the
//! runtime spawns one task per message and routes the response back.

use crate::api::{GalleryApi, IdentityProvider};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tracing::Instrument;

#[derive(Clone)]
pub struct GalleryWorker {
    api: Arc<dyn GalleryApi>,
    identity: Arc<dyn IdentityProvider>,
}

impl GalleryWorker {
    pub fn new(api: Arc<dyn GalleryApi>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { api, identity }
    }

    /// Helper for turning request results into responses with consistent logging.
    fn handle_api_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
        E: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "request successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, category = ?e.category(), "request failed");
                on_error(e.to_string())
            }
        }
    }

    async fn sign_in(&self) -> Result<crate::domain::SessionToken> {
        let assertion = self.identity.sign_in().await?;
        self.api.exchange_identity(&assertion).await
    }

    async fn process(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::FetchImages { seq, request, token, .. } => Self::handle_api_result(
                "list images",
                self.api.list_images(&request, token.as_ref()).await,
                |images| {
                    tracing::debug!(seq, image_count = images.len(), "images loaded");
                    WorkerResponse::ImagesLoaded { seq, images }
                },
                |message| WorkerResponse::FetchFailed { seq, message },
            ),

            WorkerMessage::ToggleLike { id, token, .. } => {
                let result = self.api.toggle_like(&id, &token).await;
                let failed_id = id.clone();
                Self::handle_api_result(
                    "toggle like",
                    result,
                    |state| WorkerResponse::LikeConfirmed { id, state },
                    |message| WorkerResponse::LikeFailed { id: failed_id, message },
                )
            }

            WorkerMessage::SignIn { .. } => Self::handle_api_result(
                "sign in",
                self.sign_in().await,
                |token| WorkerResponse::SessionIssued { token },
                |message| WorkerResponse::AuthFailed { message },
            ),

            WorkerMessage::FetchMyLikes { token, .. } => Self::handle_api_result(
                "my likes",
                self.api.my_likes(&token).await,
                |images| WorkerResponse::MyLikesLoaded { images },
                |message| WorkerResponse::MyLikesFailed { message },
            ),
        }
    }

    /// Processes a worker message and returns the matching response.
    ///
    /// The request span is parented to the span that built the message, so a
    /// background call shows up under the event that caused it.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());
        if let Some(parent) = message.trace_context().and_then(|ctx| ctx.to_otel_context()) {
            span.set_parent(parent);
        }

        self.process(message).instrument(span).await
    }
}
