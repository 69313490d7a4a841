//! Rendering of [`AppError`] as JSON HTTP responses.
//!
//! Handlers return `Result<_, HttpAppError>` and use `?` on anything that
//! converts into `AppError`; status, body and log level all come from the
//! error's [`ErrorMetadata`].

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::{FormRejection, JsonRejection},
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use faceswap_core::{AppError, ErrorMetadata, LogLevel};
use faceswap_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use utoipa::ToSchema;

/// Set once from the configured environment during router setup.
static HIDE_DETAILS: AtomicBool = AtomicBool::new(false);

/// Hide error details and chains from every client (production).
pub fn hide_error_details(hide: bool) {
    HIDE_DETAILS.store(hide, Ordering::Relaxed);
}

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Error chain, outside production and for non-sensitive errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Stable code such as `NOT_FOUND`
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(err: &AppError, hide_details: bool) -> Self {
        let show = !hide_details && !err.is_sensitive();
        Self {
            error: err.client_message(),
            details: show.then(|| err.detailed_message()),
            error_type: show.then(|| err.error_type().to_string()),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action().map(String::from),
        }
    }
}

/// `AppError` lives in faceswap-core, so `IntoResponse` goes on this local newtype.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl HttpAppError {
    /// The single rejection used for every failed admin check.
    pub fn unauthorized() -> Self {
        HttpAppError(AppError::Unauthorized("Unauthorized".to_string()))
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(err.into())
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let message = err.body_text();
        HttpAppError(if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::InvalidInput(format!("Failed to read multipart: {}", message))
        })
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<FormRejection> for HttpAppError {
    fn from(rejection: FormRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid form body: {}",
            rejection.body_text()
        )))
    }
}

/// `Json<T>` whose rejection is rendered as an [`ErrorResponse`].
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state).await?;
        Ok(ValidatedJson(inner))
    }
}

/// `Form<T>` whose rejection is rendered as an [`ErrorResponse`].
#[derive(Debug, Clone, Copy)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(inner) = Form::<T>::from_request(req, state).await?;
        Ok(ValidatedForm(inner))
    }
}

fn log_error(err: &AppError) {
    let error_type = err.error_type();
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, error_type, code, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %err, error_type, code, "Request failed"),
        LogLevel::Error => tracing::error!(error = %err, error_type, code, "Request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let err = self.0;
        log_error(&err);

        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from_app_error(&err, HIDE_DETAILS.load(Ordering::Relaxed));

        (status, Json(body)).into_response()
    }
}
