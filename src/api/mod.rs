//! Remote content retrieval: the photo service and the text service.
//!
//! Sources depend on the [`HttpFetch`] capability, never on reqwest
//! directly, so a run can be driven without network access.

pub mod client;
pub mod parser;
pub mod sources;

use crate::error::AppError;
use crate::types::ValidatedUrl;
use client::ApiResponse;

/// A read request against a remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: ValidatedUrl,
    /// Full `Authorization` header value, if the service needs one.
    pub authorization: Option<String>,
}

impl FetchRequest {
    pub fn get(url: ValidatedUrl) -> Self {
        Self {
            url,
            authorization: None,
        }
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }
}

/// The ability to perform an HTTP GET and hand back the raw response.
///
/// Implementations return `Err` only when no response was received.
/// Non-2xx responses come back as `Ok` with their status for the caller
/// to judge.
#[async_trait::async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, request: &FetchRequest) -> Result<ApiResponse<String>, AppError>;
}

pub use client::HttpClient;
pub use sources::{ImageSource, TextSource};
