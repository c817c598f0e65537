// src/api/parser.rs
//! Parsing of photo service and text service response bodies.

use crate::constants::REGULAR_IMAGE_URL_POINTER;
use crate::error::AppError;
use crate::model::TextItem;
use serde_json::Value;

/// Extracts the regular-size image URL from a photo service body.
///
/// Returns `Err` when the body is not JSON at all and `Ok(None)` when it is
/// JSON but `urls.regular` is absent, null, empty, or not a string.
pub fn parse_image_url(body: &str) -> Result<Option<String>, AppError> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        AppError::MalformedResponse(format!("photo service body is not JSON: {}", e))
    })?;

    Ok(json
        .pointer(REGULAR_IMAGE_URL_POINTER)
        .and_then(Value::as_str)
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string))
}

/// Parses a text service body as an array of records.
pub fn parse_text_items(body: &str) -> Result<Vec<TextItem>, AppError> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        log::error!("Failed to parse text service body: {} (body: {})", e, preview);
        AppError::MalformedResponse(format!("text service body is not a list of posts: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_regular_image_url() {
        let body = r#"{"id":"abc","urls":{"raw":"http://x/raw.jpg","regular":"http://x/a.jpg"}}"#;
        assert_eq!(
            parse_image_url(body).unwrap(),
            Some("http://x/a.jpg".to_string())
        );
    }

    #[test]
    fn missing_or_mistyped_field_is_none() {
        assert_eq!(parse_image_url(r#"{"urls":{"small":"s"}}"#).unwrap(), None);
        assert_eq!(parse_image_url(r#"{"errors":["OAuth error"]}"#).unwrap(), None);
        assert_eq!(parse_image_url(r#"{"urls":{"regular":null}}"#).unwrap(), None);
        assert_eq!(parse_image_url(r#"{"urls":{"regular":7}}"#).unwrap(), None);
        assert_eq!(parse_image_url(r#"{"urls":{"regular":""}}"#).unwrap(), None);
        assert_eq!(parse_image_url(r#"{"urls":{"regular":"  "}}"#).unwrap(), None);
        assert_eq!(parse_image_url("[]").unwrap(), None);
    }

    #[test]
    fn non_json_image_body_is_an_error() {
        assert!(matches!(
            parse_image_url("<html>rate limited</html>"),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn parses_text_records() {
        let body = r#"[{"userId":1,"id":1,"title":"T1","body":"B1"}]"#;
        assert_eq!(parse_text_items(body).unwrap(), vec![TextItem::new("T1", "B1")]);
        assert!(parse_text_items("[]").unwrap().is_empty());
    }

    #[test]
    fn text_body_that_is_not_a_list_is_an_error() {
        assert!(parse_text_items(r#"{"title":"T1"}"#).is_err());
        assert!(parse_text_items("not json").is_err());
    }
}
