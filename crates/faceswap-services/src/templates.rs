//! Template gallery management.

use base64::Engine;
use faceswap_core::media_type::{is_template_image, DEFAULT_IMAGE_EXTENSION};
use faceswap_core::models::TemplateInfo;
use faceswap_core::{AppError, StorageArea};
use faceswap_storage::{keys, Storage};
use std::sync::Arc;

#[derive(Clone)]
pub struct TemplateService {
    storage: Arc<dyn Storage>,
}

impl TemplateService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn info(filename: String) -> TemplateInfo {
        let path = format!("/static/{}/{}", StorageArea::Templates.dir_name(), filename);
        TemplateInfo { filename, path }
    }

    /// Gallery images, sorted by file name. Files with other extensions are skipped.
    pub async fn list(&self) -> Result<Vec<TemplateInfo>, AppError> {
        let names = self.storage.list(StorageArea::Templates).await?;
        Ok(names
            .into_iter()
            .filter(|name| is_template_image(name))
            .map(Self::info)
            .collect())
    }

    /// Store an uploaded template as `{uuid}_{original_name}`.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn upload(&self, original_name: &str, data: Vec<u8>) -> Result<TemplateInfo, AppError> {
        let filename = keys::upload_filename(original_name);
        self.storage
            .put(StorageArea::Templates, &filename, data)
            .await?;

        tracing::info!(filename = %filename, "Template uploaded");
        Ok(Self::info(filename))
    }

    /// Store a base64-encoded template as `{uuid}.png`.
    #[tracing::instrument(skip(self, encoded))]
    pub async fn upload_encoded(&self, encoded: &str) -> Result<TemplateInfo, AppError> {
        let data = decode_base64(encoded)
            .map_err(|_| AppError::InvalidInput("Invalid base64 template data".to_string()))?;

        let filename = keys::generated_filename(DEFAULT_IMAGE_EXTENSION);
        self.storage
            .put(StorageArea::Templates, &filename, data)
            .await?;

        tracing::info!(filename = %filename, "Template uploaded");
        Ok(Self::info(filename))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, filename: &str) -> Result<(), AppError> {
        self.storage
            .delete(StorageArea::Templates, filename)
            .await?;

        tracing::info!(filename = %filename, "Template deleted");
        Ok(())
    }
}

/// Decode standard base64, tolerating a `data:*;base64,` prefix and surrounding whitespace.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let encoded = encoded.trim();
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    base64::engine::general_purpose::STANDARD.decode(payload)
}
