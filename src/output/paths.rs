// src/output/paths.rs
//! File naming for posts written to disk.

use crate::constants::{MAX_FILENAME_STEM_BYTES, MAX_RENAME_ATTEMPTS};
use crate::error::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};

/// Creates a clean file name for a post from its title.
pub fn create_clean_filename(title: &str) -> String {
    format!("{}.json", sanitize_filename(title))
}

/// Sanitizes a string to be safe for use as a filename.
///
/// The result is at most [`MAX_FILENAME_STEM_BYTES`] bytes long and is cut
/// on a character boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut safe_name = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    // Trim whitespace and dots
    safe_name = safe_name.trim().trim_matches('.').to_string();

    if safe_name.len() > MAX_FILENAME_STEM_BYTES {
        let mut end = MAX_FILENAME_STEM_BYTES;
        while !safe_name.is_char_boundary(end) {
            end -= 1;
        }
        safe_name.truncate(end);
        safe_name = safe_name.trim_end().trim_end_matches('.').to_string();
    }

    if safe_name.is_empty() {
        safe_name = "untitled".to_string();
    }

    safe_name
}

/// Creates `path`, or the first free `stem (n).ext` next to it, and returns
/// the open file.
///
/// Each candidate is claimed with `create_new`, so two writers racing for the
/// same name never end up sharing a file.
pub async fn create_unique_file(path: &Path) -> Result<(PathBuf, File), AppError> {
    let path_error = |reason: &str| AppError::PathError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| path_error("cannot extract file stem"))?;
    let extension = path.extension().and_then(|e| e.to_str());
    let parent = path
        .parent()
        .ok_or_else(|| path_error("cannot extract parent directory"))?;

    for i in 0..=MAX_RENAME_ATTEMPTS {
        let candidate = match (i, extension) {
            (0, _) => path.to_path_buf(),
            (_, Some(ext)) => parent.join(format!("{} ({}).{}", stem, i, ext)),
            (_, None) => parent.join(format!("{} ({})", stem, i)),
        };
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(path_error("every numbered alternative is taken"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn replaces_reserved_characters() {
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("  ..hidden.. "), "hidden");
        assert_eq!(sanitize_filename(""), "untitled");
        assert_eq!(create_clean_filename("sunt aut facere"), "sunt aut facere.json");
    }

    #[test]
    fn truncates_long_titles_on_char_boundaries() {
        let title = "é".repeat(MAX_FILENAME_STEM_BYTES);
        let name = sanitize_filename(&title);
        assert_eq!(name.len(), MAX_FILENAME_STEM_BYTES);
        assert!(name.chars().all(|c| c == 'é'));
    }

    #[test]
    fn four_byte_characters_stay_under_the_name_limit() {
        let name = create_clean_filename(&"😀".repeat(120));
        assert!(name.len() <= 255);
        assert!(sanitize_filename(&"😀".repeat(120)).len() <= MAX_FILENAME_STEM_BYTES);
        assert!(name.ends_with("😀.json"));
    }

    #[tokio::test]
    async fn create_unique_file_numbers_collisions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.json");

        let (first, _) = create_unique_file(&path).await.unwrap();
        assert_eq!(first, path);

        let (second, _) = create_unique_file(&path).await.unwrap();
        assert_eq!(second, dir.path().join("post (1).json"));

        fs::write(dir.path().join("post (2).json"), "{}").unwrap();
        let (third, _) = create_unique_file(&path).await.unwrap();
        assert_eq!(third, dir.path().join("post (3).json"));
        assert_eq!(fs::read_to_string(dir.path().join("post (2).json")).unwrap(), "{}");
    }
}
