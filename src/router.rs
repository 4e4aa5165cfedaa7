use crate::handlers::{
    chart::get_chart,
    controls::get_controls,
    dataset::get_dataset_summary,
    health::health_check,
    page::index_page,
    sessions::{create_session, get_session, post_control_event},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Chart page
        .route("/", get(index_page))
        // Health check
        .route("/health", get(health_check))
        // Control panel and dataset
        .route("/api/v1/controls", get(get_controls))
        .route("/api/v1/dataset", get(get_dataset_summary))
        // Stateless chart building
        .route("/api/v1/chart", get(get_chart))
        // Reactive sessions
        .route("/api/v1/sessions", post(create_session))
        .route("/api/v1/sessions/:session_id", get(get_session))
        .route("/api/v1/sessions/:session_id/events", post(post_control_event))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
