use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{ControlPanel, TimeRangeSelection};
use compute::{BinderState, ChartError, ReactiveBinder, UpdateOutcome};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::handlers::{chart_error_response, status_for};
use crate::schemas::{
    ApiResponse, AppState, ControlEvent, ControlUpdate, ErrorResponse, SessionCreated,
    SessionSnapshot, UpdateStatus,
};
use crate::sessions::{SessionHandle, spawn_build};

async fn find_session(
    state: &AppState,
    session_id: u64,
) -> Result<SessionHandle, (StatusCode, Json<ErrorResponse>)> {
    match state.sessions.get(session_id).await {
        Some(handle) => Ok(handle),
        None => {
            warn!("Session {} not found", session_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    format!("Session {} not found", session_id),
                    "SESSION_NOT_FOUND",
                )),
            ))
        }
    }
}

/// Turn a binder outcome into the status and payload sent to the page
fn update_response(outcome: UpdateOutcome) -> (StatusCode, Json<ApiResponse<ControlUpdate>>) {
    match outcome {
        UpdateOutcome::Rendered { generation, chart } => {
            let update = ControlUpdate {
                outcome: UpdateStatus::Rendered,
                generation: Some(generation),
                chart: Some(chart),
                notice: None,
                error_code: None,
            };
            (StatusCode::OK, Json(ApiResponse::ok(update, "Chart updated")))
        }
        UpdateOutcome::Superseded { generation, latest } => {
            let update = ControlUpdate {
                outcome: UpdateStatus::Superseded,
                generation: Some(generation),
                chart: None,
                notice: None,
                error_code: None,
            };
            let message = format!("Superseded by generation {}", latest);
            (StatusCode::OK, Json(ApiResponse::ok(update, message)))
        }
        UpdateOutcome::Failed {
            generation,
            error,
            retained,
        } => {
            let update = ControlUpdate {
                outcome: UpdateStatus::Failed,
                generation,
                chart: retained,
                notice: Some(error.to_string()),
                error_code: Some(error.code().to_string()),
            };
            let response = ApiResponse {
                data: update,
                message: error.to_string(),
                success: false,
            };
            (status_for(&error), Json(response))
        }
    }
}

/// Create a page session showing the default selection
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "sessions",
    responses(
        (status = 201, description = "Session created successfully", body = ApiResponse<SessionCreated>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<SessionCreated>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_session function");
    let controls = ControlPanel::standard();

    let mut binder = ReactiveBinder::new();
    let chart = match binder.apply(&state.table, controls.default_zone, TimeRangeSelection::default()) {
        UpdateOutcome::Rendered { chart, .. } => chart,
        other => {
            error!("Initial chart was not rendered: {:?}", other);
            let err = ChartError::BuildFailure("initial chart was not rendered".to_string());
            return Err(chart_error_response(&err));
        }
    };

    let (session_id, _) = state.sessions.create(binder).await;
    info!("Session {} created with {} initial points", session_id, chart.len());

    let response = ApiResponse::ok(
        SessionCreated {
            session_id,
            controls,
            chart,
        },
        "Session created successfully",
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get the binder state of a session
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{session_id}",
    tag = "sessions",
    params(
        ("session_id" = u64, Path, description = "Session ID"),
    ),
    responses(
        (status = 200, description = "Session retrieved successfully", body = ApiResponse<SessionSnapshot>),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_session(
    Path(session_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, (StatusCode, Json<ErrorResponse>)> {
    let handle = find_session(&state, session_id).await?;
    let binder = handle.lock().await;

    let selection = binder.selection();
    let snapshot = SessionSnapshot {
        session_id,
        state: match binder.state() {
            BinderState::Idle => "idle".to_string(),
            BinderState::Updating { .. } => "updating".to_string(),
        },
        generation: binder.latest_generation(),
        zone: selection.map(|s| s.zone),
        range: selection.map(|s| s.range.into()),
        chart: binder.displayed().cloned(),
        notice: binder.notice().map(str::to_string),
    };

    Ok(Json(ApiResponse::ok(snapshot, "Session retrieved successfully")))
}

/// Apply a control change to a session and return the chart to display
///
/// Only the response to the most recent event carries `rendered`; an event
/// overtaken by a newer one answers `superseded` and must not be drawn.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{session_id}/events",
    tag = "sessions",
    params(
        ("session_id" = u64, Path, description = "Session ID"),
    ),
    request_body = ControlEvent,
    responses(
        (status = 200, description = "Event applied or superseded", body = ApiResponse<ControlUpdate>),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 422, description = "Invalid selection, previous chart retained", body = ApiResponse<ControlUpdate>),
        (status = 500, description = "Chart build failed, previous chart retained", body = ApiResponse<ControlUpdate>)
    )
)]
#[instrument(skip(state))]
pub async fn post_control_event(
    Path(session_id): Path<u64>,
    State(state): State<AppState>,
    Json(event): Json<ControlEvent>,
) -> Result<(StatusCode, Json<ApiResponse<ControlUpdate>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering post_control_event function");
    let handle = find_session(&state, session_id).await?;

    let (zone, range) = match compute::parse_selection(&event.zone, event.range[0], event.range[1]) {
        Ok(selection) => selection,
        Err(e) => {
            let outcome = handle.lock().await.reject(e);
            return Ok(update_response(outcome));
        }
    };

    let ticket = handle.lock().await.begin(zone, range);
    debug!("Session {} issued generation {}", session_id, ticket.generation);

    let outcome = match spawn_build(state.table.clone(), handle, ticket).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Session {} update task failed: {}", session_id, e);
            let err = ChartError::BuildFailure(format!("update task failed: {}", e));
            return Err(chart_error_response(&err));
        }
    };
    Ok(update_response(outcome))
}
