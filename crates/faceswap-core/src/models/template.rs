use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Gallery template as listed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TemplateInfo {
    pub filename: String,
    /// Servable path, `/static/templates_gallery/{filename}`
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateUploadResponse {
    pub success: bool,
    pub filename: String,
    pub path: String,
}

impl From<TemplateInfo> for TemplateUploadResponse {
    fn from(info: TemplateInfo) -> Self {
        Self {
            success: true,
            filename: info.filename,
            path: info.path,
        }
    }
}

/// Body of the inline (function) template upload
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InlineTemplateUpload {
    /// Base64-encoded image bytes
    #[serde(default)]
    pub template: Option<String>,
}

/// Bare acknowledgement for operations with no payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
