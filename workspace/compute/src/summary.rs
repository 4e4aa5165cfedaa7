use common::{DatasetSummary, Zone, ZoneStats};
use tracing::instrument;

use crate::dataset::LoadTable;

/// Min, max and mean of one zone column, skipping missing readings;
/// `None` when the column has no readings.
pub fn zone_stats(table: &LoadTable, zone: Zone) -> ZoneStats {
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    let mut sum = 0.0;
    let mut count = 0usize;

    for value in table.zone_values(zone).filter(|v| !v.is_nan()) {
        min = Some(min.map_or(value, |m| m.min(value)));
        max = Some(max.map_or(value, |m| m.max(value)));
        sum += value;
        count += 1;
    }

    let mean = if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    };

    ZoneStats {
        zone,
        label: zone.label().to_string(),
        min,
        max,
        mean,
    }
}

/// Record count, coverage and per-zone statistics of the table.
#[instrument(skip_all, fields(records = table.len()))]
pub fn summarize(table: &LoadTable) -> DatasetSummary {
    DatasetSummary {
        source: table.source().to_string(),
        records: table.len(),
        first_timestamp: table.first_timestamp(),
        last_timestamp: table.last_timestamp(),
        zones: Zone::ALL.iter().map(|&zone| zone_stats(table, zone)).collect(),
    }
}
