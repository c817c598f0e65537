// src/pipeline/assembly.rs
//! Pure assembly of posts from fetched content. No I/O happens here.

use crate::model::{Document, TextItem};
use crate::types::PostStatus;

/// Builds one published document per text item, all sharing `image`.
pub fn assemble(image: &str, texts: &[TextItem]) -> Vec<Document> {
    assemble_with_status(image, texts, PostStatus::Publish)
}

/// Builds one document per text item with the given status, in input order.
pub fn assemble_with_status(image: &str, texts: &[TextItem], status: PostStatus) -> Vec<Document> {
    texts
        .iter()
        .map(|text| Document {
            title: text.title.clone(),
            content_html: embed_image(&text.body, image),
            status,
        })
        .collect()
}

/// Appends an image tag to a post body. The URL is embedded verbatim.
pub fn embed_image(body: &str, image: &str) -> String {
    format!("{}<img src=\"{}\">", body, image)
}
