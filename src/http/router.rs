//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Client CRUD and bulk operations
        .route("/clients", get(handlers::list_clients).post(handlers::create_client))
        .route("/clients/bulk-delete", post(handlers::bulk_delete_clients))
        .route("/clients/bulk-status", post(handlers::bulk_update_client_status))
        .route(
            "/clients/{id}",
            get(handlers::get_client)
                .patch(handlers::update_client)
                .delete(handlers::delete_client),
        )
        // Feedback
        .route("/feedback", get(handlers::list_feedback).post(handlers::submit_feedback))
        .route(
            "/feedback/{id}",
            get(handlers::get_feedback).delete(handlers::delete_feedback),
        )
        // Forms
        .route("/forms", get(handlers::list_forms).post(handlers::create_form))
        .route("/forms/bulk-delete", post(handlers::bulk_delete_forms))
        .route(
            "/forms/{id}",
            get(handlers::get_form)
                .patch(handlers::update_form)
                .delete(handlers::delete_form),
        )
        .route("/forms/{id}/publish", post(handlers::publish_form))
        .route("/forms/{id}/archive", post(handlers::archive_form))
        // Reports
        .route("/reports", get(handlers::list_reports).post(handlers::create_report))
        .route("/reports/bulk-delete", post(handlers::bulk_delete_reports))
        .route(
            "/reports/{id}",
            get(handlers::get_report).delete(handlers::delete_report),
        )
        .route("/reports/{id}/generate", post(handlers::generate_report))
        .route("/reports/{id}/retry", post(handlers::retry_report))
        .route("/reports/{id}/download", post(handlers::download_report))
        // Analytics endpoints
        .route("/analytics/summary", get(handlers::get_dashboard_summary))
        .route("/analytics/trends", get(handlers::get_trend_series))
        .route("/analytics/performance", get(handlers::get_client_performance))
        .route("/analytics/satisfaction", get(handlers::get_satisfaction_distribution))
        .route("/analytics/sources", get(handlers::get_source_distribution));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
