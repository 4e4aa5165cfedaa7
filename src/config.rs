use anyhow::Result;
use compute::DataSource;
use std::time::Duration;
use tracing::info;

use crate::schemas::AppState;
use crate::sessions::SessionStore;

/// Default bind address; 8050 is the port the chart page has always used
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8050";

/// Upper bound on concurrently tracked page sessions
pub const SESSION_CAPACITY: u64 = 10_000;

/// Sessions without a request for this long are dropped
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Load the dataset and build the application state
pub async fn initialize_app_state(data_source: &str) -> Result<AppState> {
    // Parsing a data source never fails; anything that is not a URL is a path
    let source: DataSource = data_source.parse()?;

    info!("Loading dataset from {}", source);
    let table = compute::load(&source).await?;

    let sessions = SessionStore::new(SESSION_CAPACITY, SESSION_IDLE_TIMEOUT);

    Ok(AppState::new(table, sessions))
}
