//! Tracer provider backed by a file span exporter.
//!
//! ```text
//! tracing-opentelemetry → opentelemetry_sdk → OtlpFileExporter → serpdeck-otlp.json
//! ```

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::{ready, BoxFuture, FutureExt};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;

/// Writes each exported batch as one OTLP JSON line.
#[derive(Debug)]
struct OtlpFileExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    stopped: bool,
}

impl OtlpFileExporter {
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped {
            return Err(TraceError::from("trace file exporter stopped"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(format!("writing trace file: {e}")))
    }
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        ready(self.write_batch(&batch)).boxed()
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Builds a provider that exports every finished span straight to `file_path`.
///
/// Export is synchronous; there is no async runtime in the plugin.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        writer: FileWriter::new(file_path),
        formatter: SpanFormatter::new(resource.clone()),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
