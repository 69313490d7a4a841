//! Face-swap pipeline
//!
//! Builds the two-image generation request, consumes the chunk stream in
//! arrival order and hands every produced image to an [`ArtifactSink`].
//! The pipeline itself never touches storage.

use async_trait::async_trait;
use base64::Engine;
use faceswap_core::media_type::extension_for_mime;
use faceswap_core::models::{GeneratedImage, InlineImage};
use faceswap_core::{AppError, AspectRatio, ImageSize, StorageArea};
use faceswap_genai::{ChunkPart, GenerationRequest, ImageGenerator, InputImage};
use faceswap_storage::{keys, Storage};
use futures::StreamExt;
use std::sync::Arc;

use crate::prompt::{compose_prompt, TEMPLATE_IMAGE_LABEL, USER_IMAGE_LABEL};

/// Inputs of one swap
#[derive(Debug, Clone)]
pub struct SwapInput {
    pub user_photo: InputImage,
    pub template: InputImage,
    pub image_size: ImageSize,
    pub aspect_ratio: Option<AspectRatio>,
}

/// Ordered artifacts plus the text accumulated across the stream
#[derive(Debug, Clone)]
pub struct SwapOutcome<A> {
    pub artifacts: Vec<A>,
    pub text: String,
}

/// Destination for generated images.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    type Artifact: Send;

    async fn accept(&self, image: GeneratedImage) -> Result<Self::Artifact, AppError>;
}

/// Writes images to the generated area and yields their public paths.
pub struct StoredArtifacts {
    storage: Arc<dyn Storage>,
}

impl StoredArtifacts {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ArtifactSink for StoredArtifacts {
    type Artifact = String;

    async fn accept(&self, image: GeneratedImage) -> Result<String, AppError> {
        let stored = self
            .storage
            .put(StorageArea::Generated, &image.filename, image.data)
            .await?;

        stored
            .public_path()
            .ok_or_else(|| AppError::Internal("Generated area is not publicly served".to_string()))
    }
}

/// Keeps images in memory, encoded as base64.
#[derive(Debug, Default)]
pub struct InlineArtifacts;

#[async_trait]
impl ArtifactSink for InlineArtifacts {
    type Artifact = InlineImage;

    async fn accept(&self, image: GeneratedImage) -> Result<InlineImage, AppError> {
        Ok(InlineImage {
            filename: image.filename,
            data: base64::engine::general_purpose::STANDARD.encode(&image.data),
            mime_type: image.mime_type,
        })
    }
}

#[derive(Clone)]
pub struct FaceSwapPipeline {
    generator: Arc<dyn ImageGenerator>,
}

impl FaceSwapPipeline {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    /// Run one generation. Any remote failure aborts the whole swap; artifacts
    /// already handed to the sink stay where the sink put them.
    #[tracing::instrument(
        skip(self, input, sink),
        fields(
            generator = %self.generator.name(),
            image_size = %input.image_size,
            aspect_ratio = input.aspect_ratio.as_ref().map(|r| r.as_str()).unwrap_or("none"),
        )
    )]
    pub async fn run<S: ArtifactSink>(
        &self,
        input: SwapInput,
        sink: &S,
    ) -> Result<SwapOutcome<S::Artifact>, AppError> {
        let start = std::time::Instant::now();

        let request = GenerationRequest {
            images: vec![
                (USER_IMAGE_LABEL.to_string(), input.user_photo),
                (TEMPLATE_IMAGE_LABEL.to_string(), input.template),
            ],
            prompt: compose_prompt(input.aspect_ratio.as_ref()),
            image_size: input.image_size,
        };

        let mut stream = self
            .generator
            .generate(request)
            .await
            .map_err(generation_error)?;

        let mut artifacts = Vec::new();
        let mut text = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(generation_error)?;

            // Only the first part of each chunk contributes.
            match chunk.first_part() {
                Some(ChunkPart::InlineData { mime_type, data }) if !data.is_empty() => {
                    let image = GeneratedImage {
                        filename: keys::generated_filename(extension_for_mime(mime_type)),
                        data: data.clone(),
                        mime_type: mime_type.clone(),
                    };
                    tracing::debug!(
                        filename = %image.filename,
                        size_bytes = image.data.len(),
                        "Received generated image"
                    );
                    artifacts.push(sink.accept(image).await?);
                }
                Some(ChunkPart::Text(t)) if !t.is_empty() => text.push_str(t),
                _ => {}
            }
        }

        tracing::info!(
            artifacts = artifacts.len(),
            text_len = text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Face swap generation finished"
        );

        Ok(SwapOutcome { artifacts, text })
    }
}

fn generation_error(err: anyhow::Error) -> AppError {
    AppError::Generation(format!("{:#}", err))
}
