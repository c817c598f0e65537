// src/pipeline/mod.rs
//! The post generation run: fetch → assemble → persist.
//!
//! A run moves through `Idle → Fetching → Assembling → Persisting → Done`.
//! It never returns an error. Every outcome is reported through the
//! [`RunReport`], whose log is the full account of what happened.

mod assembly;
mod run_log;

pub use assembly::{assemble, assemble_with_status, embed_image};
pub use run_log::{LogRecord, Outcome, PipelineStage, RunLog};

use crate::api::{HttpFetch, ImageSource, TextSource};
use crate::config::PipelineConfig;
use crate::constants::{
    CONTENT_INCOMPLETE, POSTS_CREATED, RUN_FAILED_HEADLINE, RUN_SUCCEEDED_HEADLINE,
};
use crate::model::{Document, PublishedPost, TextItem};
use crate::output::Persister;
use crate::types::PostStatus;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub succeeded: bool,
    pub log: RunLog,
    /// Posts the persister accepted, in submission order.
    pub published: Vec<PublishedPost>,
}

impl RunReport {
    pub fn headline(&self) -> &'static str {
        if self.succeeded {
            RUN_SUCCEEDED_HEADLINE
        } else {
            RUN_FAILED_HEADLINE
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline())?;
        if !self.log.is_empty() {
            write!(f, "\n{}", self.log)?;
        }
        Ok(())
    }
}

/// Orchestrates one or more isolated runs against the same collaborators.
pub struct PostGenerator {
    images: ImageSource,
    texts: TextSource,
    persister: Arc<dyn Persister>,
    status: PostStatus,
}

impl PostGenerator {
    pub fn new(
        config: &PipelineConfig,
        http: Arc<dyn HttpFetch>,
        persister: Arc<dyn Persister>,
    ) -> Self {
        let retry = config.retry_policy();
        Self {
            images: ImageSource::new(
                http.clone(),
                config.image_endpoint.clone(),
                &config.access_key,
                retry,
            ),
            texts: TextSource::new(http, config.text_endpoint.clone(), retry),
            persister,
            status: config.post_status,
        }
    }

    /// Performs a complete run with a fresh log.
    pub async fn run(&self) -> RunReport {
        let mut run = Run::new();

        run.advance(PipelineStage::Fetching);
        let image = self.images.fetch_image(&mut run.log).await;
        let texts = self.texts.fetch_texts(&mut run.log).await;

        let (image, texts) = match gathered(image, texts) {
            Some(content) => content,
            None => {
                run.advance(PipelineStage::Done);
                run.log.failure(PipelineStage::Done, CONTENT_INCOMPLETE);
                return run.finish(false);
            }
        };

        run.advance(PipelineStage::Assembling);
        let documents = assemble_with_status(&image, &texts, self.status);
        log::info!("Assembled {} posts", documents.len());

        run.advance(PipelineStage::Persisting);
        let failed = self.persist_all(&documents, &mut run).await;

        run.advance(PipelineStage::Done);
        if failed == 0 {
            run.log.success(PipelineStage::Done, POSTS_CREATED);
            run.finish(true)
        } else {
            run.log.failure(
                PipelineStage::Done,
                format!("Failed to create {} of {} posts.", failed, documents.len()),
            );
            run.finish(false)
        }
    }

    /// Submits every document, continuing past failures. Returns how many failed.
    async fn persist_all(&self, documents: &[Document], run: &mut Run) -> usize {
        let mut failed = 0;
        for document in documents {
            match self.persister.persist(document).await {
                Ok(post) => {
                    log::debug!("Persisted '{}' at {}", post.title, post.location);
                    run.published.push(post);
                }
                Err(e) => {
                    failed += 1;
                    run.log.failure(
                        PipelineStage::Persisting,
                        format!("Failed to create post \"{}\": {}", document.title, e),
                    );
                }
            }
        }
        failed
    }
}

/// Both inputs, or nothing: an absent image, absent texts, or an empty
/// text list all mean there is nothing to assemble.
fn gathered(image: Option<String>, texts: Option<Vec<TextItem>>) -> Option<(String, Vec<TextItem>)> {
    match (image, texts) {
        (Some(image), Some(texts)) if !texts.is_empty() => Some((image, texts)),
        _ => None,
    }
}

/// Mutable state of a single run.
struct Run {
    stage: PipelineStage,
    log: RunLog,
    published: Vec<PublishedPost>,
}

impl Run {
    fn new() -> Self {
        Self {
            stage: PipelineStage::Idle,
            log: RunLog::new(),
            published: Vec::new(),
        }
    }

    fn advance(&mut self, next: PipelineStage) {
        log::debug!("Run stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn finish(self, succeeded: bool) -> RunReport {
        debug_assert_eq!(self.stage, PipelineStage::Done);
        RunReport {
            succeeded,
            log: self.log,
            published: self.published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gathered_requires_both_inputs_and_some_text() {
        let texts = vec![TextItem::new("T", "B")];
        assert!(gathered(Some("i".into()), Some(texts.clone())).is_some());
        assert!(gathered(None, Some(texts.clone())).is_none());
        assert!(gathered(Some("i".into()), None).is_none());
        assert!(gathered(Some("i".into()), Some(vec![])).is_none());
        assert!(gathered(None, None).is_none());
    }

    #[test]
    fn report_renders_headline_then_log() {
        let mut log = RunLog::new();
        log.failure(PipelineStage::Fetching, "a");
        log.failure(PipelineStage::Done, "b");
        let report = RunReport {
            succeeded: false,
            log,
            published: Vec::new(),
        };
        assert_eq!(report.to_string(), "Failed to create posts.\na\nb");
    }
}
