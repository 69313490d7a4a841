//! Common utilities for multipart upload handlers

use crate::error::HttpAppError;
use axum::extract::Multipart;
use std::collections::HashMap;

/// A file part of a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client file name; `Some("")` when the browser sent an empty file input
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Whether the client actually selected a file
    pub fn has_file_name(&self) -> bool {
        self.file_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Multipart form split into file parts and text fields.
///
/// A part counts as a file when it is one of `file_fields` or carries a file name.
/// For repeated names the first occurrence wins.
#[derive(Debug, Default)]
pub struct MultipartForm {
    files: HashMap<String, UploadedFile>,
    fields: HashMap<String, String>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart, file_fields: &[&str]) -> Result<Self, HttpAppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(|s| s.to_string()).unwrap_or_default();
            let file_name = field.file_name().map(|s| s.to_string());

            if file_fields.contains(&name.as_str()) || file_name.is_some() {
                let data = field.bytes().await?;
                form.files.entry(name).or_insert(UploadedFile {
                    file_name,
                    data: data.to_vec(),
                });
            } else {
                let value = field.text().await?;
                form.fields.entry(name).or_insert(value);
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Text field value; empty values count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Raw text field value, including empty strings.
    pub fn raw_text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_presence() {
        let mut file = UploadedFile {
            file_name: None,
            data: vec![],
        };
        assert!(!file.has_file_name());
        file.file_name = Some(String::new());
        assert!(!file.has_file_name());
        file.file_name = Some("me.png".to_string());
        assert!(file.has_file_name());
    }

    #[test]
    fn text_treats_blank_as_absent() {
        let mut form = MultipartForm::default();
        form.fields.insert("template_id".to_string(), "  ".to_string());
        form.fields.insert("image_size".to_string(), "4k".to_string());

        assert_eq!(form.text("template_id"), None);
        assert_eq!(form.raw_text("template_id"), Some("  "));
        assert_eq!(form.text("image_size"), Some("4k"));
        assert_eq!(form.text("missing"), None);
    }
}
