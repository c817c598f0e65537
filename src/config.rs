// src/config.rs
use crate::constants::{
    ACCESS_KEY_ENV, DEFAULT_IMAGE_ENDPOINT, DEFAULT_OUTPUT_DIR, DEFAULT_TEXT_ENDPOINT,
    WORDPRESS_APP_PASSWORD_ENV, WORDPRESS_USERNAME_ENV,
};
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::output::WordPressCredentials;
use crate::types::{AccessKey, PostStatus, ValidatedUrl};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input. Secrets come from the environment, never flags.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Photo service endpoint returning one random photo
    #[arg(long, default_value = DEFAULT_IMAGE_ENDPOINT)]
    pub image_endpoint: String,

    /// Text service endpoint returning a list of posts
    #[arg(long, default_value = DEFAULT_TEXT_ENDPOINT)]
    pub text_endpoint: String,

    /// Status given to every created post
    #[arg(long, value_enum, ignore_case = true, default_value_t = PostStatus::Publish)]
    pub status: PostStatus,

    /// Where created posts are stored
    #[arg(long, value_enum, default_value_t = TargetKind::Directory)]
    pub target: TargetKind,

    /// Directory for the 'directory' target
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Site root for the 'wordpress' target (e.g., "https://blog.example.com")
    #[arg(long)]
    pub wordpress_url: Option<String>,

    /// Extra attempts per fetch after a transport failure (0 = no retry)
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Per-request timeout in seconds (defaults to the HTTP client's own)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the run report as JSON instead of plain lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    Directory,
    Stdout,
    Wordpress,
}

/// A resolved publishing target with everything it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishTarget {
    Directory(PathBuf),
    Stdout,
    WordPress {
        site: ValidatedUrl,
        credentials: WordPressCredentials,
    },
}

/// Resolved pipeline configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub image_endpoint: ValidatedUrl,
    pub text_endpoint: ValidatedUrl,
    pub access_key: AccessKey,
    pub post_status: PostStatus,
    pub retries: u32,
    pub timeout: Option<Duration>,
    pub target: PublishTarget,
    pub json: bool,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Default endpoints and targets around an explicit access key.
    pub fn new(access_key: AccessKey) -> Self {
        Self {
            image_endpoint: ValidatedUrl::parse(DEFAULT_IMAGE_ENDPOINT)
                .expect("Default image endpoint should be valid"),
            text_endpoint: ValidatedUrl::parse(DEFAULT_TEXT_ENDPOINT)
                .expect("Default text endpoint should be valid"),
            access_key,
            post_status: PostStatus::Publish,
            retries: 0,
            timeout: None,
            target: PublishTarget::Directory(PathBuf::from(DEFAULT_OUTPUT_DIR)),
            json: false,
            verbose: false,
        }
    }

    /// Resolves a complete configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves a configuration, reading environment variables through `env`.
    pub fn resolve_with<F>(cli: CommandLineInput, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key_str = env(ACCESS_KEY_ENV).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                ACCESS_KEY_ENV
            ))
        })?;
        let access_key = AccessKey::new(access_key_str)?;

        let target = match cli.target {
            TargetKind::Directory => PublishTarget::Directory(PathBuf::from(cli.output_dir)),
            TargetKind::Stdout => PublishTarget::Stdout,
            TargetKind::Wordpress => {
                let site = cli.wordpress_url.as_deref().ok_or_else(|| {
                    AppError::MissingConfiguration(
                        "--wordpress-url is required for the wordpress target".to_string(),
                    )
                })?;
                let require = |name: &str| {
                    env(name).ok_or_else(|| {
                        AppError::MissingConfiguration(format!(
                            "{} environment variable not set",
                            name
                        ))
                    })
                };
                PublishTarget::WordPress {
                    site: ValidatedUrl::parse(site)?,
                    credentials: WordPressCredentials::new(
                        require(WORDPRESS_USERNAME_ENV)?,
                        require(WORDPRESS_APP_PASSWORD_ENV)?,
                    )?,
                }
            }
        };

        Ok(PipelineConfig {
            image_endpoint: ValidatedUrl::parse(&cli.image_endpoint)?,
            text_endpoint: ValidatedUrl::parse(&cli.text_endpoint)?,
            access_key,
            post_status: cli.status,
            retries: cli.retries,
            timeout: cli.timeout_secs.map(Duration::from_secs),
            target,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_retries(self.retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["post-generator"];
        argv.extend_from_slice(args);
        CommandLineInput::try_parse_from(argv).unwrap()
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_resolve_with_an_access_key() {
        let config =
            PipelineConfig::resolve_with(parse(&[]), env_of(&[(ACCESS_KEY_ENV, "key123")]))
                .unwrap();

        assert_eq!(config.access_key.as_str(), "key123");
        assert_eq!(config.image_endpoint.as_str(), DEFAULT_IMAGE_ENDPOINT);
        assert_eq!(config.text_endpoint.as_str(), DEFAULT_TEXT_ENDPOINT);
        assert_eq!(config.post_status, PostStatus::Publish);
        assert_eq!(config.target, PublishTarget::Directory(PathBuf::from("posts")));
        assert_eq!(config.retry_policy().max_attempts, 1);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn missing_access_key_fails_fast() {
        let err = PipelineConfig::resolve_with(parse(&[]), env_of(&[])).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(ref m) if m.contains(ACCESS_KEY_ENV)));

        let err = PipelineConfig::resolve_with(parse(&[]), env_of(&[(ACCESS_KEY_ENV, "  ")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_bad_endpoint_and_status() {
        let env = env_of(&[(ACCESS_KEY_ENV, "key123")]);
        assert!(
            PipelineConfig::resolve_with(parse(&["--image-endpoint", "ftp://x"]), &env).is_err()
        );

        let err = CommandLineInput::try_parse_from(["post-generator", "--status", "pending"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert_eq!(parse(&["--status", "Draft"]).status, PostStatus::Draft);

        let config = PipelineConfig::resolve_with(
            parse(&["--status", "draft", "--retries", "2", "--timeout-secs", "5"]),
            &env,
        )
        .unwrap();
        assert_eq!(config.post_status, PostStatus::Draft);
        assert_eq!(config.retry_policy().max_attempts, 3);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn wordpress_target_needs_site_and_credentials() {
        let args = ["--target", "wordpress", "--wordpress-url", "https://blog.example.com"];

        let err = PipelineConfig::resolve_with(parse(&args), env_of(&[(ACCESS_KEY_ENV, "k")]))
            .unwrap_err();
        assert!(
            matches!(err, AppError::MissingConfiguration(ref m) if m.contains(WORDPRESS_USERNAME_ENV))
        );

        let err = PipelineConfig::resolve_with(
            parse(&["--target", "wordpress"]),
            env_of(&[(ACCESS_KEY_ENV, "k")]),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(ref m) if m.contains("--wordpress-url")));

        let config = PipelineConfig::resolve_with(
            parse(&args),
            env_of(&[
                (ACCESS_KEY_ENV, "k"),
                (WORDPRESS_USERNAME_ENV, "admin"),
                (WORDPRESS_APP_PASSWORD_ENV, "abcd efgh"),
            ]),
        )
        .unwrap();
        match config.target {
            PublishTarget::WordPress { site, credentials } => {
                assert_eq!(site.as_str(), "https://blog.example.com/");
                assert_eq!(credentials.username(), "admin");
            }
            other => panic!("unexpected target {:?}", other),
        }
    }
}
