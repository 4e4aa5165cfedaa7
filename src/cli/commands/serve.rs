use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, debug, trace, error};

use crate::config::initialize_app_state;
use crate::router::create_router;

pub async fn serve(data_source: &str, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("LoadChart application starting up");
    debug!("Data source: {}", data_source);
    debug!("Bind address: {}", bind_address);

    // Load the dataset once; it is shared read-only for the process lifetime
    trace!("Initializing application state");
    let state = match initialize_app_state(data_source).await {
        Ok(state) => {
            debug!("Application state initialized with {} records", state.table.len());
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    trace!("Attempting to bind TCP listener to {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("LoadChart page available at http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);
    debug!("Server is ready to accept connections");

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
