//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros through `tracing-opentelemetry` into the file span
//! exporter.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const SERVICE_NAME: &str = "studio-gallery";

/// Initializes the tracing subscriber with file-based span export.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `"info"`. Spans go to
/// `<data_dir>/studio-gallery-traces.json`.
///
/// Returns the tracer provider so the caller can flush it on exit, or `None`
/// when the data directory cannot be created (observability is optional) or
/// a subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use studio_gallery::observability::init_tracing;
/// use studio_gallery::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// let _provider = init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<TracerProvider> {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = crate::infrastructure::data_dir(config);
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);

    let trace_file = crate::infrastructure::trace_file(config);
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer(SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(tracer);

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()
        .map(|()| provider)
}
