// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{content, health},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the content endpoints under `/api/content`.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let content_routes = Router::new()
        .route("/sanitize", post(content::sanitize))
        .route("/article", post(content::sanitize_article))
        .route("/strip", post(content::strip))
        .route("/truncate", post(content::truncate))
        .route("/excerpt", post(content::excerpt))
        .route("/render", post(content::render));

    Router::new()
        .route("/api/health", get(health::health))
        .nest("/api/content", content_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
