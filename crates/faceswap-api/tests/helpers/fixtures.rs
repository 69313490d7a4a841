//! Test fixtures: image blobs and request bodies.

use axum_test::multipart::{MultipartForm, Part};
use base64::Engine;

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Bytes standing in for a user's face photo
pub fn user_photo_bytes() -> Vec<u8> {
    b"user-face-photo".to_vec()
}

pub fn encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

pub fn decode(encoded: &str) -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .expect("valid base64")
}

pub fn image_part(file_name: &str, data: Vec<u8>) -> Part {
    Part::bytes(data).file_name(file_name).mime_type("image/png")
}

/// Multipart swap form with a photo and the given template id
pub fn swap_form(template_id: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("user_photo", image_part("me.png", user_photo_bytes()))
        .add_text("template_id", template_id.to_string())
}
