//! Error types for the serpdeck plugin.
//!
//! This module defines the centralized error type [`SerpdeckError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for serpdeck operations.
///
/// Covers the keyword source boundary, mutation dispatch, configuration and
/// theme loading. Wrapped I/O and JSON errors convert automatically via `#[from]`.
///
/// # Examples
///
/// ```
/// use serpdeck::domain::SerpdeckError;
///
/// fn validate_command(template: &str) -> Result<(), SerpdeckError> {
///     if template.trim().is_empty() {
///         return Err(SerpdeckError::Config("source_command is empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_command("  ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum SerpdeckError {
    /// The keyword source produced output that could not be understood.
    #[error("Keyword source error: {0}")]
    Source(String),

    /// A mutation request could not be turned into a command invocation.
    #[error("Mutation error: {0}")]
    Mutation(String),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for serpdeck operations.
pub type Result<T> = std::result::Result<T, SerpdeckError>;
