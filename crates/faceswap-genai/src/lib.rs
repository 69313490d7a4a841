//! Image generation backends
//!
//! The pipeline talks to an [`ImageGenerator`]; [`GeminiClient`] is the
//! production implementation, streaming `streamGenerateContent` over SSE.

mod gemini;
mod generator;
mod sse;

pub use gemini::GeminiClient;
pub use generator::{
    ChunkPart, ChunkStream, GenerationChunk, GenerationRequest, ImageGenerator, InputImage,
};
