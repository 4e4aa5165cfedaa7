use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::Zone;

/// Descriptive statistics of one zone column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ZoneStats {
    pub zone: Zone,
    pub label: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// Shape and coverage of the loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DatasetSummary {
    /// Where the table was loaded from
    pub source: String,
    /// Number of records
    pub records: usize,
    /// Timestamp of the first record in table order
    pub first_timestamp: Option<NaiveDateTime>,
    /// Timestamp of the last record in table order
    pub last_timestamp: Option<NaiveDateTime>,
    pub zones: Vec<ZoneStats>,
}
