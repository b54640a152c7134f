//! Tracing with OTLP JSON spans written to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → traces file
//! ```
//!
//! The traces file is `<data_dir>/studio-gallery-traces.json`, one OTLP
//! document per line, rotated at 10 MB with three backups. The filter level
//! comes from `RUST_LOG`, then the `trace_level` config key, then `info`.
//!
//! ```no_run
//! use studio_gallery::observability::init_tracing;
//! use studio_gallery::Config;
//!
//! let provider = init_tracing(&Config::default());
//! tracing::info!("gallery starting");
//! drop(provider);
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME};
