//! OpenTelemetry tracing with file-based OTLP export.
//!
//! `tracing` spans are bridged into OpenTelemetry and written as OTLP JSON
//! lines to `<data dir>/serpdeck-otlp.json`, rotated at 10 MB with three
//! numbered backups.
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive, e.g. `serpdeck::pipeline=trace`.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file span exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: Size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, init_tracing_at, SERVICE_NAME, TRACE_FILE_NAME};
