//! Control Panel declarations: the zone selector and the time-range selector.
//!
//! Both option lists are fixed constants rather than derived from the loaded
//! table, so the controls stay stable if the dataset gains or loses columns.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;
use utoipa::ToSchema;

/// Number of marker dates on the range selector.
pub const MARKER_COUNT: usize = 15;

/// Marker dates used as range-selector ticks and as filter boundaries.
pub const MARKER_DATES: [&str; MARKER_COUNT] = [
    "2004-01-01",
    "2004-05-01",
    "2004-09-01",
    "2005-01-01",
    "2005-05-01",
    "2005-09-01",
    "2006-01-01",
    "2006-05-01",
    "2006-09-01",
    "2007-01-01",
    "2007-05-01",
    "2007-09-01",
    "2008-01-01",
    "2008-05-01",
    "2008-06-22",
];

static MARKERS: LazyLock<Vec<NaiveDate>> = LazyLock::new(|| {
    MARKER_DATES
        .iter()
        .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .collect()
});

/// Marker date at `index`, if the index is on the selector.
pub fn marker_date(index: usize) -> Option<NaiveDate> {
    MARKERS.get(index).copied()
}

/// Marker date at `index` as midnight of that day.
pub fn marker_datetime(index: usize) -> Option<NaiveDateTime> {
    marker_date(index).map(|d| d.and_time(NaiveTime::MIN))
}

/// Rejected control values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown zone '{0}', expected one of zone_1..zone_5")]
    UnknownZone(String),

    #[error("range [{start}, {end}] is outside the marker list 0..={}", MARKER_COUNT - 1)]
    RangeOutOfBounds { start: usize, end: usize },

    #[error("range start {start} is after range end {end}")]
    InvertedRange { start: usize, end: usize },
}

/// One of the five load measurement columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Zone {
    #[default]
    #[serde(rename = "zone_1")]
    Zone1,
    #[serde(rename = "zone_2")]
    Zone2,
    #[serde(rename = "zone_3")]
    Zone3,
    #[serde(rename = "zone_4")]
    Zone4,
    #[serde(rename = "zone_5")]
    Zone5,
}

impl Zone {
    /// All zones in selector order.
    pub const ALL: [Zone; 5] = [Zone::Zone1, Zone::Zone2, Zone::Zone3, Zone::Zone4, Zone::Zone5];

    /// CSV column name, also the selector value.
    pub fn column(self) -> &'static str {
        match self {
            Zone::Zone1 => "zone_1",
            Zone::Zone2 => "zone_2",
            Zone::Zone3 => "zone_3",
            Zone::Zone4 => "zone_4",
            Zone::Zone5 => "zone_5",
        }
    }

    /// Display label shown in the dropdown and used as the series name.
    pub fn label(self) -> &'static str {
        match self {
            Zone::Zone1 => "ZONE 1",
            Zone::Zone2 => "ZONE 2",
            Zone::Zone3 => "ZONE 3",
            Zone::Zone4 => "ZONE 4",
            Zone::Zone5 => "ZONE 5",
        }
    }

    /// Position of the zone inside a record's value array.
    pub fn index(self) -> usize {
        match self {
            Zone::Zone1 => 0,
            Zone::Zone2 => 1,
            Zone::Zone3 => 2,
            Zone::Zone4 => 3,
            Zone::Zone5 => 4,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Zone {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .into_iter()
            .find(|zone| zone.column() == s)
            .ok_or_else(|| SelectionError::UnknownZone(s.to_string()))
    }
}

/// A validated `[start, end]` pair of marker indices with `start <= end`.
///
/// Serializes as a two-element array, the same shape the range slider emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[usize; 2]", into = "[usize; 2]")]
pub struct TimeRangeSelection {
    start_index: usize,
    end_index: usize,
}

impl TimeRangeSelection {
    /// The whole marker list, `[0, 14]`.
    pub const FULL: TimeRangeSelection = TimeRangeSelection {
        start_index: 0,
        end_index: MARKER_COUNT - 1,
    };

    pub fn new(start_index: usize, end_index: usize) -> Result<Self, SelectionError> {
        if start_index >= MARKER_COUNT || end_index >= MARKER_COUNT {
            return Err(SelectionError::RangeOutOfBounds {
                start: start_index,
                end: end_index,
            });
        }
        if start_index > end_index {
            return Err(SelectionError::InvertedRange {
                start: start_index,
                end: end_index,
            });
        }
        Ok(Self {
            start_index,
            end_index,
        })
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Resolves the selection to `(markers[start], markers[end])` at midnight.
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        let lower = MARKERS[self.start_index].and_time(NaiveTime::MIN);
        let upper = MARKERS[self.end_index].and_time(NaiveTime::MIN);
        (lower, upper)
    }
}

impl Default for TimeRangeSelection {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<[usize; 2]> for TimeRangeSelection {
    type Error = SelectionError;

    fn try_from(value: [usize; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<TimeRangeSelection> for [usize; 2] {
    fn from(range: TimeRangeSelection) -> Self {
        [range.start_index, range.end_index]
    }
}

impl fmt::Display for TimeRangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] ({} .. {})",
            self.start_index, self.end_index, MARKER_DATES[self.start_index], MARKER_DATES[self.end_index]
        )
    }
}

/// A dropdown entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ZoneOption {
    pub label: String,
    pub value: Zone,
}

/// A labelled tick on the range slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RangeMark {
    pub index: usize,
    pub label: String,
}

/// Declaration of both widgets, their legal values and their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ControlPanel {
    /// Dropdown options in display order
    pub zone_options: Vec<ZoneOption>,
    /// Zone selected on first render
    pub default_zone: Zone,
    /// Slider ticks, one per marker date
    pub range_marks: Vec<RangeMark>,
    /// Lowest slider index
    pub range_min: usize,
    /// Highest slider index
    pub range_max: usize,
    /// Slider value on first render, `[start, end]`
    #[schema(value_type = Vec<usize>)]
    pub default_range: [usize; 2],
}

impl ControlPanel {
    pub fn standard() -> Self {
        Self {
            zone_options: Zone::ALL
                .into_iter()
                .map(|zone| ZoneOption {
                    label: zone.label().to_string(),
                    value: zone,
                })
                .collect(),
            default_zone: Zone::default(),
            range_marks: MARKER_DATES
                .iter()
                .enumerate()
                .map(|(index, label)| RangeMark {
                    index,
                    label: label.to_string(),
                })
                .collect(),
            range_min: 0,
            range_max: MARKER_COUNT - 1,
            default_range: TimeRangeSelection::default().into(),
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_marker_dates_parse() {
        for index in 0..MARKER_COUNT {
            assert!(marker_date(index).is_some(), "marker {} did not parse", index);
        }
        assert_eq!(marker_date(MARKER_COUNT), None);
    }

    #[test]
    fn marker_dates_are_ascending() {
        for index in 1..MARKER_COUNT {
            assert!(marker_date(index - 1) < marker_date(index));
        }
    }

    #[test]
    fn zone_parses_from_column_name() {
        assert_eq!("zone_3".parse::<Zone>(), Ok(Zone::Zone3));
        assert_eq!(
            "zone_9".parse::<Zone>(),
            Err(SelectionError::UnknownZone("zone_9".to_string()))
        );
        assert!("ZONE 1".parse::<Zone>().is_err());
    }

    #[test]
    fn zone_serializes_as_column_name() {
        let json = serde_json::to_string(&Zone::Zone4).unwrap();
        assert_eq!(json, "\"zone_4\"");
        let zone: Zone = serde_json::from_str("\"zone_2\"").unwrap();
        assert_eq!(zone, Zone::Zone2);
    }

    #[test]
    fn range_rejects_out_of_bounds_and_inverted() {
        assert!(TimeRangeSelection::new(0, 14).is_ok());
        assert!(TimeRangeSelection::new(7, 7).is_ok());
        assert_eq!(
            TimeRangeSelection::new(0, 15),
            Err(SelectionError::RangeOutOfBounds { start: 0, end: 15 })
        );
        assert_eq!(
            TimeRangeSelection::new(5, 2),
            Err(SelectionError::InvertedRange { start: 5, end: 2 })
        );
    }

    #[test]
    fn range_deserialization_validates() {
        let range: TimeRangeSelection = serde_json::from_str("[2, 9]").unwrap();
        assert_eq!(range.start_index(), 2);
        assert_eq!(range.end_index(), 9);
        assert!(serde_json::from_str::<TimeRangeSelection>("[9, 2]").is_err());
        assert!(serde_json::from_str::<TimeRangeSelection>("[0, 20]").is_err());
    }

    #[test]
    fn range_bounds_resolve_to_midnight() {
        let range = TimeRangeSelection::new(0, 1).unwrap();
        let (lower, upper) = range.bounds();
        assert_eq!(lower.to_string(), "2004-01-01 00:00:00");
        assert_eq!(upper.to_string(), "2004-05-01 00:00:00");
    }

    #[test]
    fn standard_panel_defaults() {
        let panel = ControlPanel::standard();
        assert_eq!(panel.zone_options.len(), 5);
        assert_eq!(panel.zone_options[0].label, "ZONE 1");
        assert_eq!(panel.default_zone, Zone::Zone1);
        assert_eq!(panel.range_marks.len(), MARKER_COUNT);
        assert_eq!(panel.range_marks[14].label, "2008-06-22");
        assert_eq!(panel.default_range, [0, 14]);
    }
}
