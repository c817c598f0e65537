// src/api/sources.rs
//! The two content sources of a run.
//!
//! Neither source returns an error to its caller. A failed fetch becomes
//! `None` plus exactly one failure record in the run log.

use super::client::ApiResponse;
use super::{parser, FetchRequest, HttpFetch};
use crate::constants::{
    IMAGE_FETCH_FAILED, IMAGE_FETCH_SUCCEEDED, IMAGE_URL_MISSING, TEXT_FETCH_FAILED,
    TEXT_FETCH_SUCCEEDED,
};
use crate::error::{AppError, FetchFailure};
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{ImageResult, TextItem};
use crate::pipeline::{PipelineStage, RunLog};
use crate::types::{AccessKey, ValidatedUrl};
use std::sync::Arc;

/// Performs a GET and insists on a 2xx status, retrying per `policy`.
async fn retrieve(
    http: &dyn HttpFetch,
    request: &FetchRequest,
    policy: RetryPolicy,
) -> Result<ApiResponse<String>, AppError> {
    retry_with_backoff(
        || async move { http.get(request).await?.require_success() },
        policy,
    )
    .await
}

/// Fetches one random image URL from the photo service.
pub struct ImageSource {
    http: Arc<dyn HttpFetch>,
    request: FetchRequest,
    retry: RetryPolicy,
}

impl ImageSource {
    pub fn new(
        http: Arc<dyn HttpFetch>,
        endpoint: ValidatedUrl,
        access_key: &AccessKey,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            request: FetchRequest::get(endpoint)
                .with_authorization(access_key.authorization_header()),
            retry,
        }
    }

    /// Fetches the image URL, recording the outcome in `log`.
    pub async fn fetch_image(&self, log: &mut RunLog) -> ImageResult {
        match self.try_fetch().await {
            Ok(url) => {
                log::debug!("Image URL: {}", url);
                log.success(PipelineStage::Fetching, IMAGE_FETCH_SUCCEEDED);
                Some(url)
            }
            Err(failure) => {
                log::warn!("Image fetch from {} failed: {}", self.request.url, failure);
                let message = match failure {
                    FetchFailure::Transport { .. } => IMAGE_FETCH_FAILED,
                    FetchFailure::FieldMissing { .. } => IMAGE_URL_MISSING,
                };
                log.failure(PipelineStage::Fetching, message);
                None
            }
        }
    }

    /// Fetches the image URL and reports why it could not, without logging.
    pub async fn try_fetch(&self) -> Result<String, FetchFailure> {
        let response = retrieve(self.http.as_ref(), &self.request, self.retry)
            .await
            .map_err(|e| FetchFailure::transport(&e))?;

        match parser::parse_image_url(&response.data) {
            Ok(Some(url)) => Ok(url),
            Ok(None) => Err(FetchFailure::FieldMissing {
                field: "urls.regular",
            }),
            Err(e) => Err(FetchFailure::transport(&e)),
        }
    }
}

/// Fetches the list of placeholder posts from the text service.
pub struct TextSource {
    http: Arc<dyn HttpFetch>,
    request: FetchRequest,
    retry: RetryPolicy,
}

impl TextSource {
    pub fn new(http: Arc<dyn HttpFetch>, endpoint: ValidatedUrl, retry: RetryPolicy) -> Self {
        Self {
            http,
            request: FetchRequest::get(endpoint),
            retry,
        }
    }

    /// Fetches the text items, recording the outcome in `log`.
    ///
    /// Any 2xx response is logged as a success before the body is parsed,
    /// so an empty or unparseable list still reads as a successful fetch.
    /// An unparseable body then yields `None`.
    pub async fn fetch_texts(&self, log: &mut RunLog) -> Option<Vec<TextItem>> {
        let response = match retrieve(self.http.as_ref(), &self.request, self.retry).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Text fetch from {} failed: {}", self.request.url, e);
                log.failure(PipelineStage::Fetching, TEXT_FETCH_FAILED);
                return None;
            }
        };

        log.success(PipelineStage::Fetching, TEXT_FETCH_SUCCEEDED);

        match parser::parse_text_items(&response.data) {
            Ok(items) => {
                log::debug!("Fetched {} text items", items.len());
                Some(items)
            }
            Err(e) => {
                log::warn!("Discarding text service response: {}", e);
                None
            }
        }
    }
}
