use axum::response::Json;
use common::ControlPanel;
use tracing::instrument;

use crate::schemas::ApiResponse;

/// Get the control panel declaration
#[utoipa::path(
    get,
    path = "/api/v1/controls",
    tag = "controls",
    responses(
        (status = 200, description = "Control panel retrieved successfully", body = ApiResponse<ControlPanel>)
    )
)]
#[instrument]
pub async fn get_controls() -> Json<ApiResponse<ControlPanel>> {
    Json(ApiResponse::ok(
        ControlPanel::standard(),
        "Control panel retrieved successfully",
    ))
}
