//! Span exporter that appends OTLP JSON to the traces file.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::{self, BoxFuture, FutureExt};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;

#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    stopped: bool,
}

impl FileSpanExporter {
    const fn new(trace_file: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(trace_file),
            formatter: SpanFormatter::new(resource),
            stopped: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped {
            return Err(TraceError::from("trace exporter stopped"));
        }
        let document = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&document)
            .map_err(|e| TraceError::from(format!("writing traces: {e}")))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        future::ready(self.write_batch(&batch)).boxed()
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    /// Ignored; the resource is fixed when the exporter is built.
    fn set_resource(&mut self, _resource: &Resource) {}
}

/// Builds a provider whose spans are exported to `trace_file` as they end.
///
/// The simple processor exports on the thread closing the span, so no
/// background runtime is needed for the exporter.
pub fn create_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(trace_file, resource.clone());

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
