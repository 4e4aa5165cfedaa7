use axum::{extract::State, response::Json};
use common::DatasetSummary;
use tracing::{debug, instrument};

use crate::schemas::{ApiResponse, AppState};

/// Get a summary of the loaded dataset
#[utoipa::path(
    get,
    path = "/api/v1/dataset",
    tag = "dataset",
    responses(
        (status = 200, description = "Dataset summary retrieved successfully", body = ApiResponse<DatasetSummary>)
    )
)]
#[instrument(skip(state))]
pub async fn get_dataset_summary(State(state): State<AppState>) -> Json<ApiResponse<DatasetSummary>> {
    let summary = compute::summarize(&state.table);
    debug!("Summarized {} records", summary.records);

    Json(ApiResponse::ok(summary, "Dataset summary retrieved successfully"))
}
