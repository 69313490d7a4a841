use crate::auth::SESSION_COOKIE;
use crate::error::HttpAppError;
use crate::state::AdminState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use faceswap_services::auth::parse_bearer;
use faceswap_services::{AdminAuthorizer, AdminProof};

/// Require a live admin session cookie.
pub async fn require_admin_session(
    State(admin): State<AdminState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let valid = match jar.get(SESSION_COOKIE) {
        Some(cookie) => admin.sessions.is_valid(cookie.value()).await,
        None => false,
    };

    if !valid {
        tracing::debug!(path = %request.uri().path(), "Rejected request without admin session");
        return HttpAppError::unauthorized().into_response();
    }

    next.run(request).await
}

/// Require `Authorization: Bearer <admin token>`.
pub async fn require_bearer_token(
    State(admin): State<AdminState>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer);

    let authorized = match token {
        Some(token) => admin.api_token.authorize(&AdminProof::BearerToken(token)),
        None => false,
    };

    if !authorized {
        tracing::debug!(path = %request.uri().path(), "Rejected request without valid bearer token");
        return HttpAppError::unauthorized().into_response();
    }

    next.run(request).await
}
