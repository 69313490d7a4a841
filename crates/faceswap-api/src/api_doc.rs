//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use faceswap_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Registers the bearer scheme used by the function admin routes.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Face Swap API",
        version = "0.1.0",
        description = "Upload a photo, pick a gallery template and receive the generated composite. Admin routes manage the template gallery; function routes expose the same operations with inline base64 payloads."
    ),
    modifiers(&BearerSecurity),
    paths(
        // Health
        handlers::health::health_check,
        // Swap
        handlers::options::get_options,
        handlers::swap::swap,
        // Templates
        handlers::templates::list_templates,
        // Admin
        handlers::admin::login,
        handlers::admin::logout,
        handlers::admin::dashboard,
        handlers::admin::upload_template,
        handlers::admin::delete_template,
        // Static files
        handlers::static_files::get_generated,
        handlers::static_files::get_template,
        // Functions
        handlers::functions::generate,
        handlers::functions::admin_upload,
        handlers::functions::admin_delete,
    ),
    components(
        schemas(
            models::SwapResponse,
            models::SwapOptionsResponse,
            models::InlineSwapRequest,
            models::InlineSwapResponse,
            models::InlineImage,
            models::TemplateInfo,
            models::TemplateListResponse,
            models::TemplateUploadResponse,
            models::InlineTemplateUpload,
            models::SuccessResponse,
            handlers::health::HealthResponse,
            handlers::swap::SwapForm,
            handlers::admin::LoginForm,
            handlers::admin::TemplateUploadForm,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "swap", description = "Face swap submission and options"),
        (name = "templates", description = "Public template gallery"),
        (name = "admin", description = "Session-authenticated gallery management"),
        (name = "static", description = "Generated images and gallery templates"),
        (name = "functions", description = "Stateless entry points with inline payloads")
    )
)]
pub struct ApiDoc;
