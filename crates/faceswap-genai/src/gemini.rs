//! Gemini image generation over `streamGenerateContent` (SSE)

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use faceswap_core::media_type::DEFAULT_IMAGE_MIME;
use faceswap_core::GeminiConfig;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::generator::{
    ChunkPart, ChunkStream, GenerationChunk, GenerationRequest, ImageGenerator,
};
use crate::sse::SseDecoder;

const RESPONSE_MODALITIES: [&str; 2] = ["IMAGE", "TEXT"];

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

// generateContent request/response structures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    image_size: String,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &GeminiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for Gemini")?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Client for the configured key, or `None` when no key is configured.
    pub fn from_config(config: &GeminiConfig) -> Result<Option<Self>> {
        match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => Ok(Some(Self::new(key, config)?)),
            None => Ok(None),
        }
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.api_base, self.model
        )
    }

    fn build_body(request: &GenerationRequest) -> GenerateContentRequest {
        let engine = base64::engine::general_purpose::STANDARD;

        let mut parts = Vec::with_capacity(request.images.len() * 2 + 1);
        for (label, image) in &request.images {
            parts.push(RequestPart::Text {
                text: label.clone(),
            });
            parts.push(RequestPart::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: image.mime_type.clone(),
                    data: engine.encode(&image.data),
                },
            });
        }
        parts.push(RequestPart::Text {
            text: request.prompt.clone(),
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                response_modalities: RESPONSE_MODALITIES.iter().map(|m| m.to_string()).collect(),
                image_config: ImageConfig {
                    image_size: request.image_size.as_str().to_string(),
                },
            },
        }
    }
}

/// Parse one SSE data payload into the parts of its first candidate.
fn parse_event(payload: &str) -> Result<Option<GenerationChunk>> {
    let payload = payload.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return Ok(None);
    }

    let response: StreamResponse =
        serde_json::from_str(payload).context("Malformed event from Gemini stream")?;

    if let Some(error) = response.error {
        return Err(match error.code {
            Some(code) => anyhow!("Gemini API error {}: {}", code, error.message),
            None => anyhow!("Gemini API error: {}", error.message),
        });
    }

    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    let engine = base64::engine::general_purpose::STANDARD;
    let parts = parts
        .into_iter()
        .map(|part| -> Result<ChunkPart> {
            match (part.inline_data, part.text) {
                (Some(inline), _) => {
                    let data = engine
                        .decode(inline.data.as_bytes())
                        .context("Invalid base64 image data from Gemini")?;
                    Ok(ChunkPart::InlineData {
                        mime_type: inline
                            .mime_type
                            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
                        data,
                    })
                }
                (None, Some(text)) => Ok(ChunkPart::Text(text)),
                (None, None) => Ok(ChunkPart::Other),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(GenerationChunk { parts }))
}

struct EventStreamState {
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    finished: bool,
}

/// Turn a response body into a stream of parsed chunks, stopping at the first error.
fn chunk_stream(body: BoxStream<'static, reqwest::Result<Bytes>>) -> ChunkStream {
    let state = EventStreamState {
        body,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(payload) = state.pending.pop_front() {
                match parse_event(&payload) {
                    Ok(Some(chunk)) => return Some((Ok(chunk), state)),
                    Ok(None) => continue,
                    Err(e) => {
                        state.pending.clear();
                        state.finished = true;
                        return Some((Err(e), state));
                    }
                }
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(bytes)) => state.pending.extend(state.decoder.push(&bytes)),
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((
                        Err(anyhow!(e).context("Failed to read Gemini response stream")),
                        state,
                    ));
                }
                None => {
                    state.finished = true;
                    state.pending.extend(state.decoder.finish());
                }
            }
        }
    })
    .boxed()
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.model, image_size = %request.image_size))]
    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream> {
        let body = Self::build_body(&request);

        let response = self
            .http_client
            .post(self.stream_url())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "Gemini API request failed: {} - {}",
                status,
                error_text
            ));
        }

        tracing::debug!(status = %status, "Gemini stream opened");

        Ok(chunk_stream(response.bytes_stream().boxed()))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
