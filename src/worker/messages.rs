//! Worker message types for background request execution.
//!
//! This module defines the request and response protocol between the engine
//! and the background worker that performs network calls. It also implements
//! distributed tracing context propagation across task boundaries.

use crate::domain::{Image, ImageId, LikeState, ListRequest, SessionToken};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when a request is handed to a spawned task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when no OpenTelemetry layer is installed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use studio_gallery::worker::TraceContext;
    ///
    /// if let Some(ctx) = TraceContext::from_current() {
    ///     println!("Trace ID: {}", ctx.trace_id);
    /// }
    /// ```
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::trace!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            None
        }
    }

    /// Rebuilds the remote OpenTelemetry context this trace context points at.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Generates builder methods for `WorkerMessage` variants.
///
/// Each constructor attaches the current trace context automatically.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_images(FetchImages { seq: u64, request: ListRequest, token: Option<SessionToken> }),
    toggle_like(ToggleLike { id: ImageId, token: SessionToken }),
    sign_in(SignIn {}),
    fetch_my_likes(FetchMyLikes { token: SessionToken }),
}

/// Requests handed to the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch one page of the gallery.
    FetchImages {
        /// Issue order; responses older than the last applied one are dropped.
        seq: u64,

        request: ListRequest,

        token: Option<SessionToken>,

        trace_context: Option<TraceContext>,
    },

    /// Flip the caller's like on one image.
    ToggleLike {
        id: ImageId,

        token: SessionToken,

        trace_context: Option<TraceContext>,
    },

    /// Run the identity handshake and exchange the assertion for a session.
    SignIn {
        trace_context: Option<TraceContext>,
    },

    /// Fetch the images the caller has liked.
    FetchMyLikes {
        token: SessionToken,

        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchImages { trace_context, .. }
            | Self::ToggleLike { trace_context, .. }
            | Self::SignIn { trace_context }
            | Self::FetchMyLikes { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short name for span fields; never includes the token.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FetchImages { .. } => "fetch_images",
            Self::ToggleLike { .. } => "toggle_like",
            Self::SignIn { .. } => "sign_in",
            Self::FetchMyLikes { .. } => "fetch_my_likes",
        }
    }
}

/// Completions sent from the worker back to the engine.
///
/// Failures carry a human-readable message; the engine decides how to
/// surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    ImagesLoaded {
        seq: u64,
        images: Vec<Image>,
    },

    FetchFailed {
        seq: u64,
        message: String,
    },

    /// The toggle succeeded. `state` is the canonical like state when the
    /// service reported one.
    LikeConfirmed {
        id: ImageId,
        state: Option<LikeState>,
    },

    LikeFailed {
        id: ImageId,
        message: String,
    },

    SessionIssued {
        token: SessionToken,
    },

    AuthFailed {
        message: String,
    },

    MyLikesLoaded {
        images: Vec<Image>,
    },

    MyLikesFailed {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_without_otel_layer_carry_no_context() {
        let message = WorkerMessage::sign_in();
        assert_eq!(message, WorkerMessage::SignIn { trace_context: None });
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn trace_context_round_trips_through_otel() {
        use opentelemetry::trace::TraceContextExt;

        let ctx = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        let otel = ctx.to_otel_context().unwrap();
        let span = otel.span();
        let span_context = span.span_context();

        assert_eq!(format!("{:032x}", span_context.trace_id()), ctx.trace_id);
        assert_eq!(format!("{:016x}", span_context.span_id()), ctx.parent_span_id);
    }

    #[test]
    fn malformed_trace_ids_are_ignored() {
        let ctx = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(ctx.to_otel_context().is_none());
    }

    #[test]
    fn debug_output_hides_token() {
        let message = WorkerMessage::fetch_my_likes(SessionToken::new("secret-bearer"));
        assert!(!format!("{message:?}").contains("secret-bearer"));
    }
}
