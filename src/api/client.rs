// src/api/client.rs
//! Thin reqwest wrapper implementing [`HttpFetch`](super::HttpFetch).
//!
//! Handles headers and transport only; parsing and judging responses is
//! left to the sources.

use super::{FetchRequest, HttpFetch};
use crate::error::AppError;
use crate::types::ValidationError;
use reqwest::{header, Client, Response};
use std::time::Duration;

/// Shared HTTP client for every remote call in a run.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client. Without a timeout the transport defaults apply.
    pub fn new(timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// The underlying reqwest client, for callers that need more than GET.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl HttpFetch for HttpClient {
    async fn get(&self, request: &FetchRequest) -> Result<ApiResponse<String>, AppError> {
        log::debug!("GET {}", request.url);

        let mut builder = self
            .client
            .get(request.url.as_str())
            .header(header::ACCEPT, "application/json");
        if let Some(authorization) = &request.authorization {
            let value = header::HeaderValue::from_str(authorization).map_err(|e| {
                ValidationError::InvalidAccessKey {
                    reason: format!("not usable in an Authorization header: {}", e),
                }
            })?;
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let response = builder.send().await?;
        log::debug!("GET {} -> {}", request.url, response.status());

        extract_response_text(response).await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

impl<T> ApiResponse<T> {
    /// Fails with [`AppError::UpstreamStatus`] unless the status is 2xx.
    pub fn require_success(self) -> Result<Self, AppError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(AppError::UpstreamStatus {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
