pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::state::AppState;
use crate::tracker::handlers;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Tracker page
        .route(
            "/",
            get(handlers::handle_page).post(handlers::handle_page_submit),
        )
        // Applications API
        .route(
            "/api/v1/applications",
            get(handlers::handle_list).post(handlers::handle_create),
        )
        .route(
            "/api/v1/applications/by-date",
            get(handlers::handle_by_date),
        )
        .route("/api/v1/applications/trend", get(handlers::handle_trend))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
