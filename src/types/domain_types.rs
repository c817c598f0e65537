// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Access key for the photo service's `Client-ID` authorization scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    /// Create a new access key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();

        if key.is_empty() {
            return Err(ValidationError::InvalidAccessKey {
                reason: "access key cannot be empty".to_string(),
            });
        }

        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidAccessKey {
                reason: "access key cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the access key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value of the `Authorization` header the photo service expects.
    pub fn authorization_header(&self) -> String {
        format!("Client-ID {}", self.0)
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact access key in display
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessKey({})", self)
    }
}

/// Validated URL type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl Serialize for ValidatedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ValidatedUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl ValidatedUrl {
    /// Create a new validated URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Appends a route to this URL, keeping any path prefix the site is mounted under.
    pub fn join_route(&self, route: &str) -> Result<Self, ValidationError> {
        let base = self.0.as_str().trim_end_matches('/');
        Self::parse(&format!("{}/{}", base, route.trim_start_matches('/')))
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication status of an assembled post.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    #[default]
    Publish,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_key_validation() {
        assert!(AccessKey::new("abc123XYZ").is_ok());
        assert!(AccessKey::new("  padded-key  ").is_ok());
        assert!(AccessKey::new("").is_err());
        assert!(AccessKey::new("   ").is_err());
        assert!(AccessKey::new("two words").is_err());
    }

    #[test]
    fn test_access_key_is_redacted() {
        let key = AccessKey::new("supersecretvalue").unwrap();
        assert_eq!(key.to_string(), "supe...");
        assert_eq!(format!("{:?}", key), "AccessKey(supe...)");
        assert_eq!(key.authorization_header(), "Client-ID supersecretvalue");
    }

    #[test]
    fn test_url_validation() {
        assert!(ValidatedUrl::parse("https://api.unsplash.com/photos/random").is_ok());
        assert!(ValidatedUrl::parse("http://localhost:8080").is_ok());
        assert!(ValidatedUrl::parse("ftp://example.com").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
    }

    #[test]
    fn test_join_route_keeps_prefix() {
        let site = ValidatedUrl::parse("https://example.com/blog/").unwrap();
        let joined = site.join_route("/wp-json/wp/v2/posts").unwrap();
        assert_eq!(joined.as_str(), "https://example.com/blog/wp-json/wp/v2/posts");
    }

    #[test]
    fn test_post_status_parsing() {
        use clap::ValueEnum;

        assert_eq!(PostStatus::from_str("publish", false), Ok(PostStatus::Publish));
        assert_eq!(PostStatus::from_str("Draft", true), Ok(PostStatus::Draft));
        assert!(PostStatus::from_str("pending", true).is_err());
        assert_eq!(PostStatus::default(), PostStatus::Publish);
        assert_eq!(
            serde_json::to_string(&PostStatus::Draft).unwrap(),
            "\"draft\""
        );
    }
}
