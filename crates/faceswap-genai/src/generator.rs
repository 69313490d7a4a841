use anyhow::Result;
use async_trait::async_trait;
use faceswap_core::ImageSize;
use futures::stream::BoxStream;

/// Image sent to the model as inline data
#[derive(Debug, Clone)]
pub struct InputImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// One generation call: labelled images followed by a prompt.
///
/// Contents are sent in order as `label, image, label, image, ..., prompt`.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub images: Vec<(String, InputImage)>,
    pub prompt: String,
    pub image_size: ImageSize,
}

/// A single part of a streamed chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkPart {
    InlineData { mime_type: String, data: Vec<u8> },
    Text(String),
    /// Parts carrying neither image nor text (e.g. function calls)
    Other,
}

/// Parts of the first candidate of one streamed event, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationChunk {
    pub parts: Vec<ChunkPart>,
}

impl GenerationChunk {
    pub fn first_part(&self) -> Option<&ChunkPart> {
        self.parts.first()
    }
}

pub type ChunkStream = BoxStream<'static, Result<GenerationChunk>>;

/// Backend producing images from a generation request.
///
/// Chunks arrive in the order the backend emitted them. A stream error ends
/// the generation; callers must not expect further chunks after it.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream>;

    /// Backend name for logs
    fn name(&self) -> &str;
}
