pub mod binder;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod summary;

#[cfg(test)]
pub mod testing;

pub use binder::{BinderState, BuildTicket, ReactiveBinder, Selection, UpdateOutcome};
pub use chart::{build, build_from_raw, filter_window, parse_selection};
pub use dataset::{DEFAULT_DATA_SOURCE, DataSource, LoadRecord, LoadTable, load};
pub use error::ChartError;
pub use summary::summarize;
