//! Common transport-layer types shared between the host and the compute layer.
//! These structs are the payloads the HTTP handlers serialize, so the page
//! script and the compute crate agree on a single shape.

mod chart;
mod controls;
mod summary;

pub use chart::{
    AxisLayout, ChartLayout, ChartPoint, ChartSeries, ChartSpec, FontStyle, LineStyle,
    RangeButton,
};
pub use controls::{
    ControlPanel, MARKER_COUNT, MARKER_DATES, RangeMark, SelectionError, TimeRangeSelection, Zone,
    ZoneOption, marker_date, marker_datetime,
};
pub use summary::{DatasetSummary, ZoneStats};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the host.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` as a successful response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
