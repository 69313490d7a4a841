//! Faceswap Services Layer
//!
//! Business logic shared by both HTTP surfaces: the face-swap pipeline, swap
//! orchestration, template management and admin authorization. Transport
//! concerns (multipart, JSON bodies, cookies, headers) stay in faceswap-api.

pub mod auth;
pub mod pipeline;
pub mod prompt;
pub mod swap;
pub mod templates;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use auth::{
    AdminAuthorizer, AdminProof, SessionStore, StaticBearerToken, StaticCredentials,
};
pub use faceswap_genai::{GeminiClient, ImageGenerator};
pub use faceswap_storage::{create_storage, LocalStorage, Storage, StorageError};
pub use pipeline::{
    ArtifactSink, FaceSwapPipeline, InlineArtifacts, StoredArtifacts, SwapInput, SwapOutcome,
};
pub use swap::{SwapRequest, SwapService, UserPhoto};
pub use templates::TemplateService;
