//! Shared fixtures for compute tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::dataset::{LoadRecord, LoadTable};

/// Midnight of the given day.
pub fn ts(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Three records with zone_1 = [10, 20, 30].
pub fn sample_table() -> LoadTable {
    LoadTable::new(
        "sample",
        vec![
            LoadRecord::new(ts(2004, 2, 1), [10.0, 100.0, 1000.0, 1.0, 0.1]),
            LoadRecord::new(ts(2004, 6, 1), [20.0, 200.0, 2000.0, 2.0, 0.2]),
            LoadRecord::new(ts(2004, 10, 1), [30.0, 300.0, 3000.0, 3.0, 0.3]),
        ],
    )
}

/// Records every ten days from the first marker date, closed by one record
/// on the last marker date.
pub fn fixture_table() -> LoadTable {
    let first = ts(2004, 1, 1);
    let last = ts(2008, 6, 22);

    let mut records = Vec::new();
    let mut timestamp = first;
    let mut i = 0.0;
    while timestamp < last {
        records.push(LoadRecord::new(
            timestamp,
            [i, i * 2.0 + 1.0, i * 3.0 + 2.0, i * 4.0 + 3.0, i * 5.0 + 4.0],
        ));
        timestamp += Duration::days(10);
        i += 1.0;
    }
    records.push(LoadRecord::new(last, [i; 5]));

    LoadTable::new("fixture", records)
}
