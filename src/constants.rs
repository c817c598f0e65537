// src/constants.rs
//! Domain constants that define where content comes from, where it goes,
//! and what a run reports along the way.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Remote services
// ---------------------------------------------------------------------------

/// Photo service endpoint that returns one randomly selected image.
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://api.unsplash.com/photos/random";

/// Text service endpoint that returns a list of placeholder posts.
pub const DEFAULT_TEXT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// JSON pointer to the ready-to-embed image URL in a photo service response.
pub const REGULAR_IMAGE_URL_POINTER: &str = "/urls/regular";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";
pub const WORDPRESS_USERNAME_ENV: &str = "WORDPRESS_USERNAME";
pub const WORDPRESS_APP_PASSWORD_ENV: &str = "WORDPRESS_APP_PASSWORD";

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

/// REST route for creating posts, relative to the site root.
pub const WORDPRESS_POSTS_ROUTE: &str = "wp-json/wp/v2/posts";

pub const DEFAULT_OUTPUT_DIR: &str = "posts";

/// Longest file stem, in bytes, the directory publisher derives from a post title.
///
/// Leaves room for a " (9999)" suffix and ".json" under the common 255-byte name limit.
pub const MAX_FILENAME_STEM_BYTES: usize = 200;

/// How many numbered alternatives to try before giving up on a file name.
pub const MAX_RENAME_ATTEMPTS: u32 = 9999;

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

pub const RETRY_INITIAL_DELAY: Duration = Duration::from_millis(500);
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// Run log messages
// ---------------------------------------------------------------------------

pub const IMAGE_FETCH_SUCCEEDED: &str = "Successfully fetched image from Unsplash.";
pub const IMAGE_FETCH_FAILED: &str = "Failed to fetch image from Unsplash.";
pub const IMAGE_URL_MISSING: &str = "Failed to retrieve the image URL from Unsplash response.";
pub const TEXT_FETCH_SUCCEEDED: &str = "Successfully fetched text content.";
pub const TEXT_FETCH_FAILED: &str = "Failed to fetch text content.";
pub const CONTENT_INCOMPLETE: &str = "Failed to gather all necessary content for posts.";
pub const POSTS_CREATED: &str = "Posts created successfully.";

/// Headline printed above the run log when a run succeeds.
pub const RUN_SUCCEEDED_HEADLINE: &str = "Posts created successfully!";
/// Headline printed above the run log when a run fails.
pub const RUN_FAILED_HEADLINE: &str = "Failed to create posts.";
