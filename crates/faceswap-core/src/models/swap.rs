use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Output resolution requested from the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ImageSize {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    /// Size code used when the client sends none
    pub const DEFAULT_CODE: &'static str = "x1";

    /// Size used when the client code is not recognized
    pub const FALLBACK: ImageSize = ImageSize::TwoK;

    /// Codes accepted from clients, with the size each maps to.
    pub const CODES: [(&'static str, ImageSize); 4] = [
        ("x1", ImageSize::OneK),
        ("1k", ImageSize::OneK),
        ("2k", ImageSize::TwoK),
        ("4k", ImageSize::FourK),
    ];

    /// Map a client size code; a missing code means `x1`, an unknown one falls back to 2K.
    /// Codes match exactly, so `4K` or ` 1k ` are unknown.
    pub fn from_code(code: Option<&str>) -> ImageSize {
        let code = code.unwrap_or(Self::DEFAULT_CODE);
        Self::CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, size)| *size)
            .unwrap_or(Self::FALLBACK)
    }

    /// Value sent in the generation request
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Aspect ratios offered to users. The pipeline passes any ratio through unchecked.
pub const ASPECT_RATIOS: [&str; 7] = ["1:1", "16:9", "9:16", "4:3", "3:4", "3:2", "2:3"];

/// Requested aspect ratio, appended to the prompt as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio(String);

impl AspectRatio {
    /// Empty or whitespace-only input means no ratio was requested.
    pub fn parse_optional(value: Option<&str>) -> Option<AspectRatio> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| AspectRatio(v.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this ratio is one of the offered presets
    pub fn is_listed(&self) -> bool {
        ASPECT_RATIOS.contains(&self.0.as_str())
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Image produced by the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Unique `{uuid}.{ext}` name
    pub filename: String,
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Swap result referencing stored files by URL path
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SwapResponse {
    pub success: bool,
    /// Paths such as `/static/generated/{filename}`, in generation order
    pub images: Vec<String>,
    /// Text the model returned alongside the images
    pub text: String,
}

/// Generated image carried inline as base64
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InlineImage {
    pub filename: String,
    /// Base64-encoded image bytes
    pub data: String,
    pub mime_type: String,
}

/// Swap result carrying image bytes inline
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InlineSwapResponse {
    pub success: bool,
    pub images: Vec<InlineImage>,
    pub text: String,
}

/// Body of the inline (function) swap request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InlineSwapRequest {
    /// Base64-encoded user photo
    #[serde(default)]
    pub user_photo: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub image_size: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
}

/// Selectable swap options
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SwapOptionsResponse {
    pub image_sizes: Vec<String>,
    pub default_image_size: String,
    pub aspect_ratios: Vec<String>,
}

impl SwapOptionsResponse {
    pub fn current() -> Self {
        Self {
            image_sizes: ImageSize::CODES.iter().map(|(c, _)| c.to_string()).collect(),
            default_image_size: ImageSize::DEFAULT_CODE.to_string(),
            aspect_ratios: ASPECT_RATIOS.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_sizes() {
        assert_eq!(ImageSize::from_code(Some("x1")), ImageSize::OneK);
        assert_eq!(ImageSize::from_code(Some("1k")), ImageSize::OneK);
        assert_eq!(ImageSize::from_code(Some("2k")), ImageSize::TwoK);
        assert_eq!(ImageSize::from_code(Some("4k")), ImageSize::FourK);
    }

    #[test]
    fn codes_match_exactly() {
        assert_eq!(ImageSize::from_code(Some("4K")), ImageSize::TwoK);
        assert_eq!(ImageSize::from_code(Some(" 1k ")), ImageSize::TwoK);
        assert_eq!(ImageSize::from_code(Some("X1")), ImageSize::TwoK);
    }

    #[test]
    fn missing_code_uses_x1() {
        assert_eq!(ImageSize::from_code(None), ImageSize::OneK);
    }

    #[test]
    fn unknown_code_falls_back_to_2k() {
        assert_eq!(ImageSize::from_code(Some("8k")), ImageSize::TwoK);
        assert_eq!(ImageSize::from_code(Some("")), ImageSize::TwoK);
        assert_eq!(ImageSize::from_code(Some("huge")).as_str(), "2K");
    }

    #[test]
    fn image_size_serializes_as_api_value() {
        let json = serde_json::to_string(&ImageSize::FourK).unwrap();
        assert_eq!(json, "\"4K\"");
    }

    #[test]
    fn aspect_ratio_parsing() {
        assert_eq!(AspectRatio::parse_optional(None), None);
        assert_eq!(AspectRatio::parse_optional(Some("")), None);
        assert_eq!(AspectRatio::parse_optional(Some("   ")), None);

        let ratio = AspectRatio::parse_optional(Some("16:9")).unwrap();
        assert_eq!(ratio.as_str(), "16:9");
        assert!(ratio.is_listed());

        let odd = AspectRatio::parse_optional(Some("5:7")).unwrap();
        assert!(!odd.is_listed());
    }

    #[test]
    fn inline_request_tolerates_missing_fields() {
        let req: InlineSwapRequest = serde_json::from_str(r#"{"template_id":"a.png"}"#).unwrap();
        assert!(req.user_photo.is_none());
        assert_eq!(req.template_id.as_deref(), Some("a.png"));
    }
}
