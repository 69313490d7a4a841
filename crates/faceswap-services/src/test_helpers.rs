//! Scripted generator shared by unit and integration tests.
//!
//! Enabled for other crates through the `test-helpers` feature.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use faceswap_genai::{ChunkPart, ChunkStream, GenerationChunk, GenerationRequest, ImageGenerator};
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays a fixed list of chunks (or errors) on every call and records requests.
pub struct ScriptedGenerator {
    script: Vec<Result<GenerationChunk, String>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<GenerationChunk, String>>) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request; panics if the generator was never called.
    pub fn last_request(&self) -> GenerationRequest {
        self.last_request
            .lock()
            .unwrap()
            .clone()
            .expect("generator was never called")
    }
}

#[async_trait]
impl ImageGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        let items: Vec<Result<GenerationChunk>> = self
            .script
            .iter()
            .map(|item| item.clone().map_err(|e| anyhow!(e)))
            .collect();
        Ok(futures::stream::iter(items).boxed())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn image_chunk(mime_type: &str, data: &[u8]) -> GenerationChunk {
    GenerationChunk {
        parts: vec![ChunkPart::InlineData {
            mime_type: mime_type.to_string(),
            data: data.to_vec(),
        }],
    }
}

pub fn text_chunk(text: &str) -> GenerationChunk {
    GenerationChunk {
        parts: vec![ChunkPart::Text(text.to_string())],
    }
}
