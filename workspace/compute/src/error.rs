use common::SelectionError;
use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The dataset source could not be fetched or parsed
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    /// The dataset is missing one of the expected columns
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A control value outside the enumerated set
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Unexpected failure while building a chart
    #[error("Chart build failure: {0}")]
    BuildFailure(String),
}

impl ChartError {
    /// Stable machine-readable code for transport payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ChartError::DataUnavailable(_) => "DATA_UNAVAILABLE",
            ChartError::SchemaMismatch(_) => "SCHEMA_MISMATCH",
            ChartError::InvalidSelection(_) => "INVALID_SELECTION",
            ChartError::BuildFailure(_) => "BUILD_FAILURE",
        }
    }

    /// Startup errors abort the process; the rest only affect one session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChartError::DataUnavailable(_) | ChartError::SchemaMismatch(_)
        )
    }
}

impl From<SelectionError> for ChartError {
    fn from(error: SelectionError) -> Self {
        ChartError::InvalidSelection(error.to_string())
    }
}

// Implement From<polars::error::PolarsError> for ChartError
impl From<polars::error::PolarsError> for ChartError {
    fn from(error: polars::error::PolarsError) -> Self {
        match error {
            polars::error::PolarsError::ColumnNotFound(_) => {
                let err = ChartError::SchemaMismatch(format!("Column not found: {}", error));
                error!(?err, "DataFrame error: Column not found");
                err
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                let err = ChartError::SchemaMismatch(format!("{}", error));
                error!(?err, "DataFrame error: Schema mismatch");
                err
            }
            polars::error::PolarsError::NoData(_) => {
                let err = ChartError::DataUnavailable(format!("No data: {}", error));
                error!(?err, "DataFrame error: No data");
                err
            }
            _ => {
                let err = ChartError::DataUnavailable(format!("CSV error: {}", error));
                error!(?err, "DataFrame error");
                err
            }
        }
    }
}

impl From<std::io::Error> for ChartError {
    fn from(error: std::io::Error) -> Self {
        let err = ChartError::DataUnavailable(format!("I/O error: {}", error));
        error!(?err, "Dataset I/O error");
        err
    }
}

impl From<reqwest::Error> for ChartError {
    fn from(error: reqwest::Error) -> Self {
        let err = ChartError::DataUnavailable(format!("HTTP error: {}", error));
        error!(?err, "Dataset fetch error");
        err
    }
}

/// Type alias for Result with ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
