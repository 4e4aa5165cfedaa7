use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use common::Zone;
use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument};

use crate::error::{ChartError, Result};

/// Name of the timestamp column in the source CSV.
pub const DATETIME_COLUMN: &str = "datetime";

/// Public copy of the daily five-zone load dataset.
pub const DEFAULT_DATA_SOURCE: &str =
    "https://raw.githubusercontent.com/ateetmaharjan/Dash_app/master/dailyload5zone.csv";

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl FromStr for DataSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DataSource::Url(s.to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// One row of the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadRecord {
    pub timestamp: NaiveDateTime,
    /// Load in kW, indexed by [`Zone::index`]
    pub zones: [f64; 5],
}

impl LoadRecord {
    pub fn new(timestamp: NaiveDateTime, zones: [f64; 5]) -> Self {
        Self { timestamp, zones }
    }

    pub fn value(&self, zone: Zone) -> f64 {
        self.zones[zone.index()]
    }
}

/// The immutable in-memory dataset, in source order.
#[derive(Clone, PartialEq)]
pub struct LoadTable {
    source: String,
    records: Vec<LoadRecord>,
}

impl LoadTable {
    pub fn new(source: impl Into<String>, records: Vec<LoadRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[LoadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.first().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.last().map(|r| r.timestamp)
    }

    /// Values of one zone column in table order.
    pub fn zone_values(&self, zone: Zone) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.value(zone))
    }
}

impl fmt::Debug for LoadTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTable")
            .field("source", &self.source)
            .field("records", &self.records.len())
            .finish()
    }
}

/// Loads the dataset once from a file or URL.
#[instrument(fields(source = %source))]
pub async fn load(source: &DataSource) -> Result<LoadTable> {
    info!("Loading dataset");
    let table = match source {
        DataSource::File(path) => load_from_path(path)?,
        DataSource::Url(url) => {
            let response = reqwest::get(url.as_str()).await?.error_for_status()?;
            let bytes = response.bytes().await?;
            debug!("Fetched {} bytes", bytes.len());
            load_from_bytes(source.to_string(), bytes.to_vec())?
        }
    };
    info!(
        "Dataset loaded with {} records ({:?} .. {:?})",
        table.len(),
        table.first_timestamp(),
        table.last_timestamp()
    );
    Ok(table)
}

/// Reads and parses a CSV file.
pub fn load_from_path(path: &Path) -> Result<LoadTable> {
    debug!("Reading dataset file {}", path.display());
    let bytes = std::fs::read(path).map_err(|e| {
        ChartError::DataUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;
    load_from_bytes(path.display().to_string(), bytes)
}

/// Parses CSV content with a header row.
///
/// Column types are inferred from every row, so a zone column whose first
/// rows are whole numbers still accepts decimals further down.
pub fn load_from_bytes(source: impl Into<String>, bytes: Vec<u8>) -> Result<LoadTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    debug!("Parsed CSV into DataFrame with {} rows", df.height());

    let records = records_from_dataframe(&df)?;
    Ok(LoadTable::new(source, records))
}

fn missing_column(name: &str) -> ChartError {
    ChartError::SchemaMismatch(format!("missing column '{}'", name))
}

fn records_from_dataframe(df: &DataFrame) -> Result<Vec<LoadRecord>> {
    let datetime_col = df
        .column(DATETIME_COLUMN)
        .map_err(|_| missing_column(DATETIME_COLUMN))?;
    let zone_cols = Zone::ALL
        .iter()
        .map(|zone| {
            df.column(zone.column())
                .map(|col| (zone.column(), col))
                .map_err(|_| missing_column(zone.column()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        // Row numbers in messages count the header as line 1
        let line = i + 2;

        let raw = match datetime_col.get(i)? {
            AnyValue::String(s) => s.to_string(),
            AnyValue::StringOwned(s) => s.to_string(),
            AnyValue::Null => {
                return Err(ChartError::DataUnavailable(format!(
                    "line {}: empty {}",
                    line, DATETIME_COLUMN
                )));
            }
            other => format!("{}", other),
        };
        let timestamp = parse_timestamp(&raw).ok_or_else(|| {
            ChartError::DataUnavailable(format!(
                "line {}: cannot parse {} '{}'",
                line, DATETIME_COLUMN, raw
            ))
        })?;

        let mut zones = [0.0; 5];
        for (slot, (name, col)) in zones.iter_mut().zip(&zone_cols) {
            // A blank cell is a missing reading, drawn as a gap
            *slot = match col.get(i)? {
                AnyValue::Null => f64::NAN,
                value => value.try_extract::<f64>().map_err(|e| {
                    ChartError::DataUnavailable(format!("line {}: column '{}': {}", line, name, e))
                })?,
            };
        }

        records.push(LoadRecord::new(timestamp, zones));
    }

    Ok(records)
}

/// Parses an ISO-like date or date-time; a bare date means midnight.
///
/// A UTC offset is accepted and dropped, keeping the wall-clock time as written.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            OFFSET_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}
