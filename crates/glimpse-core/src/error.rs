//! Error types for the Glimpse keyword extraction pipeline.
//!
//! Errors are split by origin: configuration loading, and the sampling
//! boundary (image loading plus vision-LLM calls). The aggregation core is a
//! total function over strings and defines no errors of its own.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Glimpse operations.
#[derive(Error, Debug)]
pub enum GlimpseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sampling boundary errors
    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors from the sampling boundary.
///
/// These never escape the sampler during a batch run — a failed iteration is
/// recorded as a skipped outcome — but image loading and provider setup
/// surface them directly.
#[derive(Error, Debug)]
pub enum SampleError {
    /// Vision-LLM call failed. Carries the HTTP status when the provider
    /// returned one, used to classify retryable failures.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// Reading the input image failed
    #[error("Failed to read image {path}: {message}")]
    ImageRead { path: PathBuf, message: String },

    /// Input image does not exist
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),
}

/// Convenience type alias for Glimpse results.
pub type Result<T> = std::result::Result<T, GlimpseError>;

/// Convenience type alias for sampling-boundary results.
pub type SampleResult<T> = std::result::Result<T, SampleError>;
