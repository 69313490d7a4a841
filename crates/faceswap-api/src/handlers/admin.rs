//! Template gallery administration for the long-lived service.
//!
//! Login and logout manage the session cookie; every other handler here sits
//! behind [`crate::auth::middleware::require_admin_session`].

use crate::auth::SESSION_COOKIE;
use crate::error::{ErrorResponse, HttpAppError, ValidatedForm};
use crate::state::AppState;
use crate::utils::upload::MultipartForm;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use faceswap_core::models::{SuccessResponse, TemplateListResponse, TemplateUploadResponse};
use faceswap_core::AppError;
use faceswap_services::{AdminAuthorizer, AdminProof};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Multipart body of `POST /admin/upload` (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct TemplateUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub template: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, jar, form), fields(operation = "admin_login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<(CookieJar, Json<SuccessResponse>), HttpAppError> {
    let proof = AdminProof::Credentials {
        username: &form.username,
        password: &form.password,
    };
    if !state.admin.credentials.authorize(&proof) {
        tracing::warn!("Admin login failed");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()).into());
    }

    let session_id = state.admin.sessions.create().await;
    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.admin.secure_cookies);

    tracing::info!("Admin logged in");
    Ok((jar.add(cookie), Json(SuccessResponse::ok())))
}

#[utoipa::path(
    post,
    path = "/admin/logout",
    tag = "admin",
    responses(
        (status = 200, description = "Session cleared", body = SuccessResponse)
    )
)]
#[tracing::instrument(skip(state, jar), fields(operation = "admin_logout"))]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.admin.sessions.revoke(cookie.value()).await;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    responses(
        (status = 200, description = "Gallery templates", body = TemplateListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "admin_dashboard"))]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TemplateListResponse>, HttpAppError> {
    let templates = state.templates.list().await?;
    Ok(Json(TemplateListResponse { templates }))
}

#[utoipa::path(
    post,
    path = "/admin/upload",
    tag = "admin",
    request_body(content = TemplateUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Template stored", body = TemplateUploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "admin_upload"))]
pub async fn upload_template(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<TemplateUploadResponse>, HttpAppError> {
    let mut form = MultipartForm::read(multipart, &["template"]).await?;

    let file = form
        .take_file("template")
        .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let file_name = match file.file_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::InvalidInput("No file selected".to_string()).into()),
    };

    let info = state.templates.upload(file_name, file.data).await?;
    Ok(Json(info.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/delete/{filename}",
    tag = "admin",
    params(("filename" = String, Path, description = "Template filename")),
    responses(
        (status = 200, description = "Template deleted", body = SuccessResponse),
        (status = 400, description = "Invalid filename", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "admin_delete"))]
pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<SuccessResponse>, HttpAppError> {
    state.templates.delete(&filename).await?;
    Ok(Json(SuccessResponse::ok()))
}
