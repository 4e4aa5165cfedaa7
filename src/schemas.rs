use common::{
    AxisLayout, ChartLayout, ChartPoint, ChartSeries, ChartSpec, ControlPanel, DatasetSummary,
    FontStyle, LineStyle, RangeButton, RangeMark, Zone, ZoneOption, ZoneStats,
};
use compute::LoadTable;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::sessions::SessionStore;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// The dataset, loaded once at startup and never written
    pub table: Arc<LoadTable>,
    /// Reactive binders, one per page session
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(table: LoadTable, sessions: SessionStore) -> Self {
        Self {
            table: Arc::new(table),
            sessions,
        }
    }
}

/// Query parameters for the stateless chart endpoint
#[derive(Debug, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChartQuery {
    /// Zone column (zone_1..zone_5), defaults to zone_1
    pub zone: Option<String>,
    /// Start marker index (0..=14), defaults to 0
    pub start: Option<usize>,
    /// End marker index (0..=14), defaults to 14
    pub end: Option<usize>,
}

/// A change of either control on the page
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ControlEvent {
    /// Selected zone value, e.g. `zone_2`
    pub zone: String,
    /// Range slider value `[start, end]` as marker indices
    #[schema(value_type = Vec<usize>)]
    pub range: [usize; 2],
}

/// Result of a control event as seen by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    /// A new chart replaces the displayed one
    Rendered,
    /// A newer event arrived first; this response must not be drawn
    Superseded,
    /// The event failed; the previous chart stays displayed
    Failed,
}

/// Response to a control event
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ControlUpdate {
    pub outcome: UpdateStatus,
    /// Build generation of this event, absent when the event was rejected
    pub generation: Option<u64>,
    /// Chart to display: the new one, or the retained one after a failure
    pub chart: Option<ChartSpec>,
    /// Non-blocking failure notice
    pub notice: Option<String>,
    /// Machine-readable failure code
    pub error_code: Option<String>,
}

/// A freshly created page session
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SessionCreated {
    pub session_id: u64,
    pub controls: ControlPanel,
    /// Chart for the default selection
    pub chart: ChartSpec,
}

/// Current binder state of a session
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SessionSnapshot {
    pub session_id: u64,
    /// `idle` or `updating`
    pub state: String,
    /// Last issued build generation
    pub generation: u64,
    /// Zone of the displayed chart
    pub zone: Option<Zone>,
    /// Range of the displayed chart
    #[schema(value_type = Option<Vec<usize>>)]
    pub range: Option<[usize; 2]>,
    pub chart: Option<ChartSpec>,
    pub notice: Option<String>,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of records in the loaded dataset
    pub records: usize,
    /// Number of live page sessions
    pub sessions: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::page::index_page,
        crate::handlers::health::health_check,
        crate::handlers::controls::get_controls,
        crate::handlers::dataset::get_dataset_summary,
        crate::handlers::chart::get_chart,
        crate::handlers::sessions::create_session,
        crate::handlers::sessions::get_session,
        crate::handlers::sessions::post_control_event,
    ),
    components(
        schemas(
            ApiResponse<ChartSpec>,
            ApiResponse<ControlPanel>,
            ApiResponse<DatasetSummary>,
            ApiResponse<SessionCreated>,
            ApiResponse<SessionSnapshot>,
            ApiResponse<ControlUpdate>,
            ErrorResponse,
            HealthResponse,
            ChartQuery,
            ControlEvent,
            ControlUpdate,
            UpdateStatus,
            SessionCreated,
            SessionSnapshot,
            ChartSpec,
            ChartSeries,
            ChartPoint,
            ChartLayout,
            AxisLayout,
            RangeButton,
            FontStyle,
            LineStyle,
            ControlPanel,
            ZoneOption,
            RangeMark,
            Zone,
            DatasetSummary,
            ZoneStats,
        )
    ),
    tags(
        (name = "page", description = "Interactive chart page"),
        (name = "health", description = "Health check endpoints"),
        (name = "controls", description = "Control panel declaration"),
        (name = "dataset", description = "Loaded dataset endpoints"),
        (name = "chart", description = "Stateless chart building"),
        (name = "sessions", description = "Reactive page sessions"),
    ),
    info(
        title = "LoadChart API",
        description = "Interactive time-series chart of daily energy load for five zones",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
