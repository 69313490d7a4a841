//! Face-swap submission for the long-lived service

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::MultipartForm;
use axum::{
    extract::{Multipart, State},
    Json,
};
use faceswap_core::models::SwapResponse;
use faceswap_core::{AppError, AspectRatio, ImageSize};
use faceswap_services::{StoredArtifacts, SwapRequest, UserPhoto};
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart body of `POST /swap` (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct SwapForm {
    #[schema(value_type = String, format = Binary)]
    pub user_photo: Vec<u8>,
    /// Template filename as listed by `/api/templates`
    pub template_id: String,
    /// One of `x1`, `1k`, `2k`, `4k`
    pub image_size: Option<String>,
    pub aspect_ratio: Option<String>,
}

#[utoipa::path(
    post,
    path = "/swap",
    tag = "swap",
    request_body(content = SwapForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Swap completed", body = SwapResponse),
        (status = 400, description = "Missing photo or template", body = ErrorResponse),
        (status = 404, description = "Template not found", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "swap"))]
pub async fn swap(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SwapResponse>, HttpAppError> {
    let mut form = MultipartForm::read(multipart, &["user_photo"]).await?;

    let photo = form
        .take_file("user_photo")
        .ok_or_else(|| AppError::InvalidInput("Please upload your photo".to_string()))?;
    if !photo.has_file_name() {
        return Err(AppError::InvalidInput("Please select a photo".to_string()).into());
    }

    let template_id = form
        .text("template_id")
        .ok_or_else(|| AppError::InvalidInput("Please select a template".to_string()))?
        .to_string();

    let request = SwapRequest {
        user_photo: UserPhoto {
            original_name: photo.file_name,
            data: photo.data,
        },
        template_id,
        image_size: ImageSize::from_code(form.raw_text("image_size")),
        aspect_ratio: AspectRatio::parse_optional(form.raw_text("aspect_ratio")),
    };

    let sink = StoredArtifacts::new(state.storage.clone());
    let outcome = state.swaps.swap(request, &sink).await?;

    tracing::info!(images = outcome.artifacts.len(), "Swap completed");

    Ok(Json(SwapResponse {
        success: true,
        images: outcome.artifacts,
        text: outcome.text,
    }))
}
