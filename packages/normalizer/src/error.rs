//! Error types for the normalizer.
//!
//! The transformation stages are infallible; everything here belongs to the
//! boundary: reading input, parsing markup, and writing output.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the normalizer library.
#[derive(Debug, Error)]
pub enum NormalizerError {
    /// Input path does not exist.
    #[error("File not found at {}", .0.display())]
    InputNotFound(PathBuf),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Output target cannot be used.
    #[error("Invalid output path {}: {reason}", .path.display())]
    InvalidOutput { path: PathBuf, reason: String },

    /// One or more documents of a batch run failed.
    #[error("{failed} of {total} documents failed to transform")]
    BatchFailed { failed: usize, total: usize },
}

/// Result type alias for normalizer operations.
pub type Result<T> = std::result::Result<T, NormalizerError>;
