pub mod chart;
pub mod controls;
pub mod dataset;
pub mod health;
pub mod page;
pub mod sessions;

use axum::{http::StatusCode, response::Json};
use compute::ChartError;

use crate::schemas::ErrorResponse;

/// HTTP status for a session-local chart error
pub fn status_for(error: &ChartError) -> StatusCode {
    match error {
        ChartError::InvalidSelection(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ChartError::DataUnavailable(_)
        | ChartError::SchemaMismatch(_)
        | ChartError::BuildFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a chart error to the error tuple the handlers return
pub fn chart_error_response(error: &ChartError) -> (StatusCode, Json<ErrorResponse>) {
    (
        status_for(error),
        Json(ErrorResponse::new(error.to_string(), error.code())),
    )
}
