#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::sessions::SessionStore;
    use axum::Router;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use compute::{LoadRecord, LoadTable};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Midnight of the given day
    pub fn ts(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// A table with one record every ten days from 2004-01-01, plus one on
    /// 2008-06-22, so the first and last records sit exactly on the outer
    /// marker dates.
    pub fn setup_test_table() -> LoadTable {
        let last = ts(2008, 6, 22);
        let mut records = Vec::new();
        let mut timestamp = ts(2004, 1, 1);
        let mut i = 0.0;
        while timestamp < last {
            records.push(LoadRecord::new(
                timestamp,
                [1000.0 + i, 2000.0 + i, 3000.0 + i, 4000.0 + i, 5000.0 + i],
            ));
            timestamp += Duration::days(10);
            i += 1.0;
        }
        records.push(LoadRecord::new(last, [1.0, 2.0, 3.0, 4.0, 5.0]));

        LoadTable::new("test-fixture", records)
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        let sessions = SessionStore::new(100, std::time::Duration::from_secs(60));
        AppState::new(setup_test_table(), sessions)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        // Get log level from environment variable or default to WARN
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        // Initialize tracing for tests
        let _ = init_test_tracing();

        create_router(setup_test_app_state())
    }
}
