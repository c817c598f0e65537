//! Content that flows through a run: the fetched image, the fetched texts,
//! and the documents assembled from them.

use crate::types::PostStatus;
use serde::{Deserialize, Serialize};

/// The regular-size image URL chosen for a run, or `None` when the photo
/// service produced nothing usable.
pub type ImageResult = Option<String>;

/// One placeholder record from the text service.
///
/// Record shape is not validated: a missing `title` or `body` deserializes
/// to an empty string and flows through to the assembled document as-is.
/// Extra fields such as `id` or `userId` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl TextItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A publishable post, handed to a [`Persister`](crate::Persister) and not
/// retained by the pipeline afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub content_html: String,
    pub status: PostStatus,
}

/// Where a persister put a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPost {
    pub title: String,
    /// A file path, a URL, or another persister-specific locator.
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_items_tolerate_missing_and_extra_fields() {
        let items: Vec<TextItem> = serde_json::from_str(
            r#"[{"userId":1,"id":1,"title":"T1","body":"B1"},{"id":2,"title":"T2"}]"#,
        )
        .unwrap();

        assert_eq!(
            items,
            vec![TextItem::new("T1", "B1"), TextItem::new("T2", "")]
        );
    }

    #[test]
    fn documents_serialize_with_camel_case_keys() {
        let doc = Document {
            title: "T1".to_string(),
            content_html: "B1<img src=\"http://x/a.jpg\">".to_string(),
            status: PostStatus::Publish,
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "T1",
                "contentHtml": "B1<img src=\"http://x/a.jpg\">",
                "status": "publish"
            })
        );
    }
}
