use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::{ChartSpec, MARKER_COUNT, Zone};
use tracing::{debug, instrument, warn};

use crate::handlers::chart_error_response;
use crate::schemas::{ApiResponse, AppState, ChartQuery, ErrorResponse};

/// Build a chart for a zone and marker range without a session
#[utoipa::path(
    get,
    path = "/api/v1/chart",
    tag = "chart",
    params(ChartQuery),
    responses(
        (status = 200, description = "Chart built successfully", body = ApiResponse<ChartSpec>),
        (status = 422, description = "Invalid zone or range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_chart(
    Query(query): Query<ChartQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ChartSpec>>, (StatusCode, Json<ErrorResponse>)> {
    let zone = query
        .zone
        .as_deref()
        .unwrap_or_else(|| Zone::default().column());
    let start = query.start.unwrap_or(0);
    let end = query.end.unwrap_or(MARKER_COUNT - 1);
    debug!("Building chart for {} [{}, {}]", zone, start, end);

    match compute::build_from_raw(&state.table, zone, start, end) {
        Ok(chart) => Ok(Json(ApiResponse::ok(chart, "Chart built successfully"))),
        Err(e) => {
            warn!("Rejected chart request: {}", e);
            Err(chart_error_response(&e))
        }
    }
}
