//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name reported as `service.name` and used for the tracer.
pub const SERVICE_NAME: &str = "serpdeck";

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "serpdeck-otlp.json";

/// Level used when `trace_level` is not configured.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber, exporting spans to
/// `<data dir>/serpdeck-otlp.json`.
///
/// Tracing is optional: if the data directory cannot be created this returns
/// without installing anything. Calling it again after a subscriber is set is
/// a no-op.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    init_tracing_at(&data_dir, config.trace_level.as_deref());
}

/// Installs the global subscriber writing into `dir`.
pub fn init_tracing_at(dir: &Path, level: Option<&str>) {
    let filter = EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
