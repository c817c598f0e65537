// src/lib.rs
//! post-generator library: fetches a random photo and a batch of placeholder
//! texts, assembles them into posts, and hands each post to a persister.
//!
//! # Public API
//!
//! - **Error handling**: `AppError`, `FetchFailure`, `ValidationError`
//! - **Configuration**: `PipelineConfig`, `CommandLineInput`, `PublishTarget`
//! - **Content**: `TextItem`, `Document`, `PublishedPost`, `PostStatus`
//! - **Sources**: `HttpFetch`, `HttpClient`, `ImageSource`, `TextSource`
//! - **Assembly**: `assemble`, `assemble_with_status`
//! - **Run**: `PostGenerator`, `RunReport`, `RunLog`
//! - **Persistence**: `Persister` and its directory, stdout, and WordPress targets

mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
mod model;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FetchFailure, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PipelineConfig, PublishTarget, TargetKind};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};

// --- Domain ---
pub use crate::model::{Document, ImageResult, PublishedPost, TextItem};
pub use crate::types::{AccessKey, PostStatus, ValidatedUrl};

// --- Sources ---
pub use crate::api::{
    client::ApiResponse,
    parser::{parse_image_url, parse_text_items},
    FetchRequest, HttpClient, HttpFetch, ImageSource, TextSource,
};

// --- Run ---
pub use crate::pipeline::{
    assemble, assemble_with_status, embed_image, LogRecord, Outcome, PipelineStage, PostGenerator,
    RunLog, RunReport,
};

// --- Persistence ---
pub use crate::output::{
    create_clean_filename, create_unique_file, sanitize_filename, DirectoryPersister, Persister,
    StdoutPersister, WordPressCredentials, WordPressPersister,
};

/// Run log messages, for callers that match on them.
pub mod messages {
    pub use crate::constants::{
        CONTENT_INCOMPLETE, IMAGE_FETCH_FAILED, IMAGE_FETCH_SUCCEEDED, IMAGE_URL_MISSING,
        POSTS_CREATED, RUN_FAILED_HEADLINE, RUN_SUCCEEDED_HEADLINE, TEXT_FETCH_FAILED,
        TEXT_FETCH_SUCCEEDED,
    };
}
