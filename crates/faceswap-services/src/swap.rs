//! Swap orchestration shared by both HTTP surfaces.

use faceswap_core::media_type::{mime_from_path, DEFAULT_IMAGE_EXTENSION};
use faceswap_core::{AppError, AspectRatio, ImageSize, StorageArea};
use faceswap_genai::{ImageGenerator, InputImage};
use faceswap_storage::{keys, Storage};
use std::sync::Arc;

use crate::pipeline::{ArtifactSink, FaceSwapPipeline, SwapInput, SwapOutcome};

/// User photo as received by an adapter
#[derive(Debug, Clone)]
pub struct UserPhoto {
    /// Client file name, when the transport carries one
    pub original_name: Option<String>,
    pub data: Vec<u8>,
}

/// A swap whose required fields are present
#[derive(Debug, Clone)]
pub struct SwapRequest {
    pub user_photo: UserPhoto,
    pub template_id: String,
    pub image_size: ImageSize,
    pub aspect_ratio: Option<AspectRatio>,
}

#[derive(Clone)]
pub struct SwapService {
    storage: Arc<dyn Storage>,
    pipeline: Option<FaceSwapPipeline>,
    retain_user_uploads: bool,
}

impl SwapService {
    /// `generator` is `None` when generation is not configured; swaps then fail.
    pub fn new(
        storage: Arc<dyn Storage>,
        generator: Option<Arc<dyn ImageGenerator>>,
        retain_user_uploads: bool,
    ) -> Self {
        Self {
            storage,
            pipeline: generator.map(FaceSwapPipeline::new),
            retain_user_uploads,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Validate, stage the user photo, run the pipeline and clean up.
    ///
    /// The template is checked before the user photo is written and before any
    /// remote call is made.
    #[tracing::instrument(
        skip(self, request, sink),
        fields(template_id = %request.template_id, image_size = %request.image_size)
    )]
    pub async fn swap<S: ArtifactSink>(
        &self,
        request: SwapRequest,
        sink: &S,
    ) -> Result<SwapOutcome<S::Artifact>, AppError> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("GEMINI_API_KEY not configured".to_string()))?;

        keys::validate_filename(&request.template_id)?;
        if !self
            .storage
            .exists(StorageArea::Templates, &request.template_id)
            .await?
        {
            return Err(AppError::NotFound("Template not found".to_string()));
        }
        let template_data = self
            .storage
            .get(StorageArea::Templates, &request.template_id)
            .await?;

        let user_filename = match request
            .user_photo
            .original_name
            .as_deref()
            .filter(|n| !n.is_empty())
        {
            Some(original) => keys::upload_filename(original),
            None => keys::user_photo_filename(DEFAULT_IMAGE_EXTENSION),
        };
        let user_mime = mime_from_path(&user_filename).to_string();
        let user_data = request.user_photo.data;

        self.storage
            .put(StorageArea::UserUploads, &user_filename, user_data.clone())
            .await?;

        let input = SwapInput {
            user_photo: InputImage {
                data: user_data,
                mime_type: user_mime,
            },
            template: InputImage {
                data: template_data,
                mime_type: mime_from_path(&request.template_id).to_string(),
            },
            image_size: request.image_size,
            aspect_ratio: request.aspect_ratio,
        };

        let result = pipeline.run(input, sink).await;

        if !self.retain_user_uploads {
            if let Err(e) = self
                .storage
                .delete(StorageArea::UserUploads, &user_filename)
                .await
            {
                tracing::warn!(error = %e, filename = %user_filename, "Failed to remove user upload");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::InlineArtifacts;
    use crate::test_helpers::{image_chunk, ScriptedGenerator};
    use faceswap_storage::LocalStorage;
    use tempfile::{tempdir, TempDir};

    async fn setup(
        retain: bool,
    ) -> (TempDir, Arc<dyn Storage>, Arc<ScriptedGenerator>, SwapService) {
        let dir = tempdir().unwrap();
        let storage: Arc<dyn Storage> = Arc::new(LocalStorage::new(dir.path()).await.unwrap());
        storage
            .put(StorageArea::Templates, "beach.jpg", b"template".to_vec())
            .await
            .unwrap();
        let generator = ScriptedGenerator::new(vec![Ok(image_chunk("image/png", b"out"))]);
        let service = SwapService::new(storage.clone(), Some(generator.clone()), retain);
        (dir, storage, generator, service)
    }

    fn request(template_id: &str) -> SwapRequest {
        SwapRequest {
            user_photo: UserPhoto {
                original_name: Some("me.png".to_string()),
                data: b"face".to_vec(),
            },
            template_id: template_id.to_string(),
            image_size: ImageSize::from_code(None),
            aspect_ratio: None,
        }
    }

    #[tokio::test]
    async fn unknown_template_is_rejected_before_generation() {
        let (_dir, storage, generator, service) = setup(true).await;

        let err = service
            .swap(request("missing.png"), &InlineArtifacts)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Template not found"));
        assert_eq!(generator.calls(), 0);
        assert!(storage
            .list(StorageArea::UserUploads)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn traversal_template_id_is_invalid_input() {
        let (_dir, _storage, generator, service) = setup(true).await;

        let err = service
            .swap(request("../generated/x.png"), &InlineArtifacts)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn unconfigured_generator_fails() {
        let dir = tempdir().unwrap();
        let storage: Arc<dyn Storage> = Arc::new(LocalStorage::new(dir.path()).await.unwrap());
        let service = SwapService::new(storage, None, false);

        let err = service
            .swap(request("beach.jpg"), &InlineArtifacts)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotConfigured(ref m) if m == "GEMINI_API_KEY not configured"));
    }

    #[tokio::test]
    async fn swap_passes_inferred_mime_types() {
        let (_dir, _storage, generator, service) = setup(true).await;

        let outcome = service
            .swap(request("beach.jpg"), &InlineArtifacts)
            .await
            .unwrap();

        assert_eq!(outcome.artifacts.len(), 1);
        let sent = generator.last_request();
        assert_eq!(sent.images[0].1.mime_type, "image/png");
        assert_eq!(sent.images[0].1.data, b"face".to_vec());
        assert_eq!(sent.images[1].1.mime_type, "image/jpeg");
        assert_eq!(sent.images[1].1.data, b"template".to_vec());
        assert_eq!(sent.image_size, ImageSize::OneK);
    }

    #[tokio::test]
    async fn user_upload_removed_unless_retained() {
        let (_dir, storage, _generator, service) = setup(false).await;
        service
            .swap(request("beach.jpg"), &InlineArtifacts)
            .await
            .unwrap();
        assert!(storage
            .list(StorageArea::UserUploads)
            .await
            .unwrap()
            .is_empty());

        let (_dir, storage, _generator, service) = setup(true).await;
        service
            .swap(request("beach.jpg"), &InlineArtifacts)
            .await
            .unwrap();
        let kept = storage.list(StorageArea::UserUploads).await.unwrap();
        assert_eq!(kept.len(), 1);
        assert!(kept[0].ends_with("_me.png"));
    }

    #[tokio::test]
    async fn nameless_photo_uses_user_prefix() {
        let (_dir, storage, _generator, service) = setup(true).await;
        let mut req = request("beach.jpg");
        req.user_photo.original_name = None;

        service.swap(req, &InlineArtifacts).await.unwrap();

        let kept = storage.list(StorageArea::UserUploads).await.unwrap();
        assert!(kept[0].starts_with("user_"));
        assert!(kept[0].ends_with(".png"));
    }
}
