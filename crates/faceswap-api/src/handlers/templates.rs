use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use faceswap_core::models::TemplateListResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "templates",
    responses(
        (status = 200, description = "Gallery templates", body = TemplateListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_templates"))]
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TemplateListResponse>, HttpAppError> {
    let templates = state.templates.list().await?;
    Ok(Json(TemplateListResponse { templates }))
}
