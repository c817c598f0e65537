// src/output/mod.rs
//! Where assembled posts go.
//!
//! The pipeline only knows the [`Persister`] capability. Each target here
//! is one way of storing a post.

mod paths;
mod wordpress;
mod writer;

use crate::error::AppError;
use crate::model::{Document, PublishedPost};

/// The ability to store one assembled post.
#[async_trait::async_trait]
pub trait Persister: Send + Sync {
    async fn persist(&self, document: &Document) -> Result<PublishedPost, AppError>;
}

// Re-export the public interface
pub use paths::{create_clean_filename, sanitize_filename, create_unique_file};
pub use wordpress::{WordPressCredentials, WordPressPersister};
pub use writer::{DirectoryPersister, StdoutPersister};
