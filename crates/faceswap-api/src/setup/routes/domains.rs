//! Route groups: public, session-guarded admin, and function entry points.

use crate::auth::middleware::{require_admin_session, require_bearer_token};
use crate::handlers;
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/options", get(handlers::options::get_options))
        .route("/api/templates", get(handlers::templates::list_templates))
        .route("/swap", post(handlers::swap::swap))
        .route(
            "/static/generated/{filename}",
            get(handlers::static_files::get_generated),
        )
        .route(
            "/static/templates_gallery/{filename}",
            get(handlers::static_files::get_template),
        )
        .route("/admin/login", post(handlers::admin::login))
        .route(
            "/admin/logout",
            get(handlers::admin::logout).post(handlers::admin::logout),
        )
        .route(
            "/.netlify/functions/generate",
            post(handlers::functions::generate),
        )
}

/// Gallery management behind the admin session cookie
pub fn admin_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(handlers::admin::dashboard))
        .route("/admin/upload", post(handlers::admin::upload_template))
        .route(
            "/admin/delete/{filename}",
            delete(handlers::admin::delete_template),
        )
        .route_layer(from_fn_with_state(
            state.admin.clone(),
            require_admin_session,
        ))
}

/// Gallery management for function callers, behind the bearer token
pub fn function_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/.netlify/functions/admin-upload",
            post(handlers::functions::admin_upload),
        )
        .route(
            "/.netlify/functions/admin-delete/{filename}",
            delete(handlers::functions::admin_delete),
        )
        .route_layer(from_fn_with_state(
            state.admin.clone(),
            require_bearer_token,
        ))
}
