use chrono::NaiveDateTime;
use common::{ChartPoint, ChartSpec, TimeRangeSelection, Zone};
use tracing::{debug, instrument};

use crate::dataset::{LoadRecord, LoadTable};
use crate::error::Result;

/// Records with `lower < timestamp < upper`, in table order.
///
/// Both bounds are exclusive, so a record stamped exactly on a marker date is
/// never part of a window that uses that marker as a bound.
pub fn filter_window(
    table: &LoadTable,
    lower: NaiveDateTime,
    upper: NaiveDateTime,
) -> impl Iterator<Item = &LoadRecord> + '_ {
    table
        .records()
        .iter()
        .filter(move |r| lower < r.timestamp && r.timestamp < upper)
}

/// Builds the chart for one (zone, range) selection.
///
/// Pure and deterministic: the same inputs always give an equal `ChartSpec`.
/// An empty window yields a chart without points.
#[instrument(skip_all, fields(records = table.len(), zone = %zone, range = %range))]
pub fn build(table: &LoadTable, zone: Zone, range: TimeRangeSelection) -> ChartSpec {
    let (lower, upper) = range.bounds();

    let points: Vec<ChartPoint> = filter_window(table, lower, upper)
        .map(|r| ChartPoint::new(r.timestamp, r.value(zone)))
        .collect();
    debug!("Selected {} of {} records", points.len(), table.len());

    ChartSpec::new(zone.label(), points)
}

/// Validates a raw control selection and builds its chart.
///
/// An unknown zone or an out-of-range / inverted pair of marker indices is
/// reported as `InvalidSelection`.
pub fn build_from_raw(
    table: &LoadTable,
    zone: &str,
    start_index: usize,
    end_index: usize,
) -> Result<ChartSpec> {
    let (zone, range) = parse_selection(zone, start_index, end_index)?;
    Ok(build(table, zone, range))
}

/// Parses raw control values into a typed selection.
pub fn parse_selection(
    zone: &str,
    start_index: usize,
    end_index: usize,
) -> Result<(Zone, TimeRangeSelection)> {
    let zone: Zone = zone.parse()?;
    let range = TimeRangeSelection::new(start_index, end_index)?;
    Ok((zone, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::testing::{fixture_table, sample_table, ts};
    use common::{ChartLayout, MARKER_COUNT};

    #[test]
    fn test_boundary_scenario_excludes_later_record() {
        // zone_1 = [10, 20, 30] at 2004-02-01, 2004-06-01, 2004-10-01
        let table = sample_table();
        let range = TimeRangeSelection::new(0, 1).unwrap();

        let chart = build(&table, Zone::Zone1, range);

        assert_eq!(chart.points(), &[ChartPoint::new(ts(2004, 2, 1), 10.0)]);
    }

    #[test]
    fn test_records_on_marker_dates_are_excluded() {
        // 2004-05-01 and 2004-09-01 are markers 1 and 2
        let table = LoadTable::new(
            "boundaries",
            vec![
                LoadRecord::new(ts(2004, 5, 1), [1.0; 5]),
                LoadRecord::new(ts(2004, 7, 1), [2.0; 5]),
                LoadRecord::new(ts(2004, 9, 1), [3.0; 5]),
            ],
        );
        let chart = build(&table, Zone::Zone2, TimeRangeSelection::new(1, 2).unwrap());

        let values: Vec<f64> = chart.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let table = fixture_table();
        for zone in Zone::ALL {
            for start in 0..MARKER_COUNT {
                for end in start..MARKER_COUNT {
                    let range = TimeRangeSelection::new(start, end).unwrap();
                    assert_eq!(build(&table, zone, range), build(&table, zone, range));
                }
            }
        }
    }

    #[test]
    fn test_equal_indices_give_empty_chart() {
        let table = fixture_table();
        for index in 0..MARKER_COUNT {
            let range = TimeRangeSelection::new(index, index).unwrap();
            let chart = build(&table, Zone::Zone1, range);
            assert!(chart.is_empty(), "range [{index}, {index}] should be empty");
            assert_eq!(chart.series_name(), "ZONE 1");
        }
    }

    #[test]
    fn test_full_range_counts_records_strictly_inside_markers() {
        let table = fixture_table();
        let (first, last) = TimeRangeSelection::FULL.bounds();
        let expected = table
            .records()
            .iter()
            .filter(|r| first < r.timestamp && r.timestamp < last)
            .count();

        let chart = build(&table, Zone::Zone1, TimeRangeSelection::FULL);

        assert_eq!(chart.len(), expected);
        // fixture has one record on the first marker and one on the last
        assert_eq!(chart.len(), table.len() - 2);
    }

    #[test]
    fn test_zone_change_keeps_timestamps() {
        let table = fixture_table();
        let range = TimeRangeSelection::new(2, 9).unwrap();

        let first = build(&table, Zone::Zone1, range);
        let second = build(&table, Zone::Zone4, range);

        assert!(!first.is_empty());
        assert_eq!(first.len(), second.len());
        assert_ne!(first.series_name(), second.series_name());
        assert_eq!(second.series_name(), "ZONE 4");
        let first_ts: Vec<_> = first.points().iter().map(|p| p.timestamp).collect();
        let second_ts: Vec<_> = second.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(first_ts, second_ts);
        assert_ne!(first.points(), second.points());
    }

    #[test]
    fn test_layout_does_not_depend_on_selection() {
        let table = fixture_table();
        let a = build(&table, Zone::Zone1, TimeRangeSelection::FULL);
        let b = build(&table, Zone::Zone5, TimeRangeSelection::new(3, 4).unwrap());
        assert_eq!(a.layout, b.layout);
        assert_eq!(&a.layout, ChartLayout::standard());
    }

    #[test]
    fn test_points_preserve_table_order() {
        let table = LoadTable::new(
            "unsorted",
            vec![
                LoadRecord::new(ts(2005, 3, 1), [3.0; 5]),
                LoadRecord::new(ts(2004, 3, 1), [1.0; 5]),
                LoadRecord::new(ts(2004, 12, 1), [2.0; 5]),
            ],
        );
        let chart = build(&table, Zone::Zone1, TimeRangeSelection::FULL);
        let values: Vec<f64> = chart.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_build_from_raw_rejects_unknown_zone() {
        let table = sample_table();
        let err = build_from_raw(&table, "zone_9", 0, 14).unwrap_err();
        assert!(matches!(err, ChartError::InvalidSelection(_)));
    }

    #[test]
    fn test_build_from_raw_rejects_bad_ranges() {
        let table = sample_table();
        assert!(matches!(
            build_from_raw(&table, "zone_1", 4, 2),
            Err(ChartError::InvalidSelection(_))
        ));
        assert!(matches!(
            build_from_raw(&table, "zone_1", 0, 15),
            Err(ChartError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_build_from_raw_matches_typed_build() {
        let table = fixture_table();
        let raw = build_from_raw(&table, "zone_3", 1, 6).unwrap();
        let typed = build(&table, Zone::Zone3, TimeRangeSelection::new(1, 6).unwrap());
        assert_eq!(raw, typed);
    }
}
