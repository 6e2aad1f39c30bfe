//! Route definitions for the Produce Freshness Advisor

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Liveness check
        .route("/health", get(handlers::health_check))
        // Image upload -> freshness report
        .route("/predict", post(handlers::predict))
        // Score an on-device classification
        .route("/advise", post(handlers::advise_classification))
        // Category knowledge table
        .route("/categories", get(handlers::list_categories))
}
