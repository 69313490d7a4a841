use axum::Json;
use faceswap_core::models::SwapOptionsResponse;

/// Image size codes and aspect ratios offered to users
#[utoipa::path(
    get,
    path = "/api/options",
    tag = "swap",
    responses(
        (status = 200, description = "Selectable swap options", body = SwapOptionsResponse)
    )
)]
pub async fn get_options() -> Json<SwapOptionsResponse> {
    Json(SwapOptionsResponse::current())
}
