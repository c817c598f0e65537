// src/output/wordpress.rs
//! Publishes posts to a WordPress site through its REST API.

use super::Persister;
use crate::constants::WORDPRESS_POSTS_ROUTE;
use crate::error::AppError;
use crate::model::{Document, PublishedPost};
use crate::types::{ValidatedUrl, ValidationError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Username and application password for HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct WordPressCredentials {
    username: String,
    app_password: String,
}

impl WordPressCredentials {
    pub fn new(
        username: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into().trim().to_string();
        let app_password = app_password.into().trim().to_string();
        if username.is_empty() {
            return Err(ValidationError::EmptyField("WordPress username"));
        }
        if app_password.is_empty() {
            return Err(ValidationError::EmptyField("WordPress application password"));
        }
        Ok(Self {
            username,
            app_password,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for WordPressCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPressCredentials")
            .field("username", &self.username)
            .field("app_password", &"***")
            .finish()
    }
}

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    title: &'a str,
    content: &'a str,
    status: &'a str,
}

#[derive(Deserialize)]
struct CreatePostResponse {
    id: Option<u64>,
    link: Option<String>,
}

/// Creates one WordPress post per document.
pub struct WordPressPersister {
    client: Client,
    posts_url: ValidatedUrl,
    credentials: WordPressCredentials,
}

impl WordPressPersister {
    pub fn new(
        client: Client,
        site: &ValidatedUrl,
        credentials: WordPressCredentials,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client,
            posts_url: site.join_route(WORDPRESS_POSTS_ROUTE)?,
            credentials,
        })
    }

    pub fn posts_url(&self) -> &ValidatedUrl {
        &self.posts_url
    }
}

#[async_trait::async_trait]
impl Persister for WordPressPersister {
    async fn persist(&self, document: &Document) -> Result<PublishedPost, AppError> {
        log::debug!("POST {} ({})", self.posts_url, document.title);

        let response = self
            .client
            .post(self.posts_url.as_str())
            .basic_auth(
                &self.credentials.username,
                Some(&self.credentials.app_password),
            )
            .json(&CreatePostRequest {
                title: &document.title,
                content: &document.content_html,
                status: document.status.as_str(),
            })
            .send()
            .await?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;
        if !status.is_success() {
            log::error!("WordPress rejected post '{}': {}", document.title, body);
            return Err(AppError::UpstreamStatus { url, status });
        }

        let created: CreatePostResponse = serde_json::from_str(&body)?;
        let location = match (created.link, created.id) {
            (Some(link), _) => link,
            (None, Some(id)) => format!("{}/{}", self.posts_url, id),
            (None, None) => self.posts_url.to_string(),
        };

        Ok(PublishedPost {
            title: document.title.clone(),
            location,
        })
    }
}
