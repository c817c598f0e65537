// src/error.rs
//! Application error types with structured error handling.
//!
//! `AppError` covers everything that can stop an operation. The pipeline
//! itself never surfaces these to its caller: fetch errors are folded into
//! a `FetchFailure` and a run log record, and persistence errors are
//! recorded per post.

use std::fmt;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Service at {url} returned HTTP {status}")]
    UpstreamStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode post as JSON: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Could not choose a file name for {path}: {reason}")]
    PathError { path: String, reason: String },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Why a remote source produced no content.
///
/// Both kinds halt the run the same way; they are kept apart so the run log
/// and diagnostics can tell an unreachable service from an unexpected payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The service could not be reached, answered with a non-2xx status,
    /// or returned a body that is not JSON.
    Transport { cause: String },
    /// The body was well-formed but lacked the expected field.
    FieldMissing { field: &'static str },
}

impl FetchFailure {
    pub fn transport(err: &AppError) -> Self {
        Self::Transport {
            cause: err.to_string(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { cause } => write!(f, "transport failure: {}", cause),
            Self::FieldMissing { field } => write!(f, "field missing: {}", field),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
