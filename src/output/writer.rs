// src/output/writer.rs
//! Local persisters: one JSON file per post, or one JSON line per post on stdout.

use super::paths::{create_clean_filename, create_unique_file};
use super::Persister;
use crate::error::AppError;
use crate::model::{Document, PublishedPost};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Writes each post as a pretty-printed JSON file in a directory.
///
/// Existing files are never overwritten; a colliding title gets a numbered name.
#[derive(Debug, Clone)]
pub struct DirectoryPersister {
    dir: PathBuf,
}

impl DirectoryPersister {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait::async_trait]
impl Persister for DirectoryPersister {
    async fn persist(&self, document: &Document) -> Result<PublishedPost, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let content = serde_json::to_string_pretty(document).map_err(AppError::Encoding)?;
        let (path, mut file) =
            create_unique_file(&self.dir.join(create_clean_filename(&document.title))).await?;

        log::debug!("Writing {} bytes to {}", content.len(), path.display());
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        log::info!("Wrote post: {}", path.display());

        Ok(PublishedPost {
            title: document.title.clone(),
            location: path.display().to_string(),
        })
    }
}

/// Prints each post as a single JSON line, for piping into another tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPersister;

#[async_trait::async_trait]
impl Persister for StdoutPersister {
    async fn persist(&self, document: &Document) -> Result<PublishedPost, AppError> {
        let line = serde_json::to_string(document).map_err(AppError::Encoding)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)?;
        handle.flush()?;

        Ok(PublishedPost {
            title: document.title.clone(),
            location: "stdout".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostStatus;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn document(title: &str) -> Document {
        Document {
            title: title.to_string(),
            content_html: "B1<img src=\"http://x/a.jpg\">".to_string(),
            status: PostStatus::Publish,
        }
    }

    #[tokio::test]
    async fn writes_one_file_per_post() {
        let dir = TempDir::new().unwrap();
        let persister = DirectoryPersister::new(dir.path().join("nested"));

        let published = persister.persist(&document("T1")).await.unwrap();

        let path = dir.path().join("nested").join("T1.json");
        assert_eq!(published.location, path.display().to_string());
        let written: Document =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, document("T1"));
    }

    #[tokio::test]
    async fn same_title_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let persister = DirectoryPersister::new(dir.path());

        let first = persister.persist(&document("same")).await.unwrap();
        let second = persister.persist(&document("same")).await.unwrap();

        assert_ne!(first.location, second.location);
        assert!(second.location.ends_with("same (1).json"));
    }

    #[tokio::test]
    async fn concurrent_writes_of_one_title_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let persister = DirectoryPersister::new(dir.path());
        let post = document("race");

        let (a, b, c) = tokio::join!(
            persister.persist(&post),
            persister.persist(&post),
            persister.persist(&post)
        );

        let mut locations = vec![a.unwrap().location, b.unwrap().location, c.unwrap().location];
        locations.sort();
        locations.dedup();
        assert_eq!(locations.len(), 3);
        for location in &locations {
            let written: Document =
                serde_json::from_str(&std::fs::read_to_string(location).unwrap()).unwrap();
            assert_eq!(written, post);
        }
    }

    #[tokio::test]
    async fn very_long_emoji_title_is_written() {
        let dir = TempDir::new().unwrap();
        let persister = DirectoryPersister::new(dir.path());

        let published = persister
            .persist(&document(&"😀".repeat(120)))
            .await
            .unwrap();

        assert!(std::path::Path::new(&published.location).exists());
    }

    #[tokio::test]
    async fn stdout_reports_location() {
        let published = StdoutPersister.persist(&document("T1")).await.unwrap();
        assert_eq!(published.location, "stdout");
        assert_eq!(published.title, "T1");
    }
}
