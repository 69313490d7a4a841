//! Serves generated images and gallery templates by filename (no auth).

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use faceswap_core::media_type::mime_from_path;
use faceswap_core::{AppError, StorageArea};
use futures::StreamExt;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/static/generated/{filename}",
    tag = "static",
    params(("filename" = String, Path, description = "Generated image filename")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Invalid filename", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn get_generated(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    serve(&state, StorageArea::Generated, &filename).await
}

#[utoipa::path(
    get,
    path = "/static/templates_gallery/{filename}",
    tag = "static",
    params(("filename" = String, Path, description = "Template filename")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Invalid filename", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    serve(&state, StorageArea::Templates, &filename).await
}

#[tracing::instrument(skip(state), fields(operation = "serve_static"))]
async fn serve(
    state: &AppState,
    area: StorageArea,
    filename: &str,
) -> Result<Response, HttpAppError> {
    let stream = state.storage.download_stream(area, filename).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_from_path(filename))
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
