//! Best-effort MIME type helpers.
//!
//! Types are guessed from file extensions only; content is never sniffed.

use std::path::Path;

/// Fallback MIME type when an extension is unknown
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Fallback file extension when a MIME type is unknown
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Extensions listed as gallery templates
pub const TEMPLATE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Guess a MIME type from a file name or path, defaulting to `image/png`.
pub fn mime_from_path(path: impl AsRef<Path>) -> &'static str {
    mime_guess::from_path(path.as_ref())
        .first_raw()
        .unwrap_or(DEFAULT_IMAGE_MIME)
}

/// Pick a file extension (without the dot) for a MIME type, defaulting to `png`.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    let normalized = mime_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(mime_type)
        .to_lowercase();

    // mime_guess lists extensions alphabetically, which would turn image/jpeg into "jfif"
    match normalized.as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        other => mime_guess::get_mime_extensions_str(other)
            .and_then(|exts| exts.first().copied())
            .unwrap_or(DEFAULT_IMAGE_EXTENSION),
    }
}

/// Whether a file name carries one of the gallery template extensions (case-insensitive).
pub fn is_template_image(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            TEMPLATE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_known_extensions() {
        assert_eq!(mime_from_path("photo.jpg"), "image/jpeg");
        assert_eq!(mime_from_path("photo.JPEG"), "image/jpeg");
        assert_eq!(mime_from_path("templates/beach.png"), "image/png");
        assert_eq!(mime_from_path("a.webp"), "image/webp");
    }

    #[test]
    fn mime_defaults_for_unknown_extension() {
        assert_eq!(mime_from_path("photo"), "image/png");
        assert_eq!(mime_from_path("photo.zzzunknown"), "image/png");
    }

    #[test]
    fn extension_for_common_image_types() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("IMAGE/WEBP"), "webp");
        assert_eq!(extension_for_mime("image/png; charset=binary"), "png");
    }

    #[test]
    fn extension_defaults_for_unknown_type() {
        assert_eq!(extension_for_mime("application/x-made-up"), "png");
        assert_eq!(extension_for_mime(""), "png");
    }

    #[test]
    fn template_extension_filter() {
        assert!(is_template_image("a.png"));
        assert!(is_template_image("b.JPG"));
        assert!(is_template_image("c.jpeg"));
        assert!(is_template_image("d.webp"));
        assert!(!is_template_image("e.gif"));
        assert!(!is_template_image("notes.txt"));
        assert!(!is_template_image("png"));
    }
}
