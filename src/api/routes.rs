use axum::http::{header, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers::{self, AppState};

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/foodtrucks", get(handlers::get_food_trucks))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(
            // CORS - allow all origins for read-only public API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(
            // Tracing
            TraceLayer::new_for_http(),
        )
}
