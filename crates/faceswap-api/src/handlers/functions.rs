//! Stateless function entry points.
//!
//! Same operations as the service routes, but bodies are JSON with base64
//! payloads and generated images come back inline instead of being stored.
//! Admin calls authenticate with a bearer token, see
//! [`crate::auth::middleware::require_bearer_token`].

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use faceswap_core::models::{
    InlineSwapRequest, InlineSwapResponse, InlineTemplateUpload, SuccessResponse,
    TemplateUploadResponse,
};
use faceswap_core::{AppError, AspectRatio, ImageSize};
use faceswap_services::templates::decode_base64;
use faceswap_services::{InlineArtifacts, SwapRequest, UserPhoto};
use std::sync::Arc;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[utoipa::path(
    post,
    path = "/.netlify/functions/generate",
    tag = "functions",
    request_body = InlineSwapRequest,
    responses(
        (status = 200, description = "Swap completed", body = InlineSwapResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Template not found", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "function_generate"))]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<InlineSwapRequest>,
) -> Result<Json<InlineSwapResponse>, HttpAppError> {
    let (Some(user_photo), Some(template_id)) = (
        non_empty(request.user_photo),
        non_empty(request.template_id),
    ) else {
        return Err(AppError::InvalidInput("Missing required fields".to_string()).into());
    };

    let data = decode_base64(&user_photo)
        .map_err(|_| AppError::InvalidInput("Invalid base64 image data".to_string()))?;

    let swap = SwapRequest {
        user_photo: UserPhoto {
            original_name: None,
            data,
        },
        template_id,
        image_size: ImageSize::from_code(request.image_size.as_deref()),
        aspect_ratio: AspectRatio::parse_optional(request.aspect_ratio.as_deref()),
    };

    let outcome = state.swaps.swap(swap, &InlineArtifacts).await?;
    if outcome.artifacts.is_empty() {
        tracing::warn!(text = %outcome.text, "Generation returned no images");
        return Err(AppError::Generation("Generation failed".to_string()).into());
    }

    tracing::info!(images = outcome.artifacts.len(), "Swap completed");

    Ok(Json(InlineSwapResponse {
        success: true,
        images: outcome.artifacts,
        text: outcome.text,
    }))
}

#[utoipa::path(
    post,
    path = "/.netlify/functions/admin-upload",
    tag = "functions",
    request_body = InlineTemplateUpload,
    responses(
        (status = 200, description = "Template stored", body = TemplateUploadResponse),
        (status = 400, description = "No template data provided", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(state, body), fields(operation = "function_admin_upload"))]
pub async fn admin_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<InlineTemplateUpload>,
) -> Result<Json<TemplateUploadResponse>, HttpAppError> {
    let encoded = non_empty(body.template)
        .ok_or_else(|| AppError::InvalidInput("No template data provided".to_string()))?;

    let info = state.templates.upload_encoded(&encoded).await?;
    Ok(Json(info.into()))
}

#[utoipa::path(
    delete,
    path = "/.netlify/functions/admin-delete/{filename}",
    tag = "functions",
    params(("filename" = String, Path, description = "Template filename")),
    responses(
        (status = 200, description = "Template deleted", body = SuccessResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(state), fields(operation = "function_admin_delete"))]
pub async fn admin_delete(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<SuccessResponse>, HttpAppError> {
    state.templates.delete(&filename).await?;
    Ok(Json(SuccessResponse::ok()))
}
