//! File name generation and validation shared by all backends.
//!
//! Every stored file gets a fresh UUID prefix so concurrent writers never collide.

use crate::traits::{StorageError, StorageResult};
use uuid::Uuid;

const MAX_ORIGINAL_NAME_LENGTH: usize = 200;

/// `{uuid}_{original}` for uploads that carry a client file name.
pub fn upload_filename(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_original_name(original))
}

/// `{uuid}.{extension}` for generated images and nameless uploads.
pub fn generated_filename(extension: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), extension.trim_start_matches('.'))
}

/// `user_{uuid}.{extension}` for user photos that arrive without a file name.
pub fn user_photo_filename(extension: &str) -> String {
    format!("user_{}", generated_filename(extension))
}

/// Reduce a client-supplied name to a safe single path component.
///
/// Directory parts are dropped and anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_original_name(original: &str) -> String {
    let last = original
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original);

    let mut cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", ".");
    }
    let cleaned = cleaned.trim_start_matches('.').to_string();

    let cleaned: String = cleaned.chars().take(MAX_ORIGINAL_NAME_LENGTH).collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Reject names that are empty or could escape their storage area.
pub fn validate_filename(filename: &str) -> StorageResult<()> {
    if filename.is_empty() {
        return Err(StorageError::InvalidKey("File name is empty".to_string()));
    }
    if filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains('\0')
    {
        return Err(StorageError::InvalidKey(
            "File name contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
