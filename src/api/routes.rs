use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::handlers::{desktop, health};
use super::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // SECURITY: Restrict CORS to localhost only - the sidecar drives the
    // local desktop and must not be reachable from foreign origins
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse::<HeaderValue>().unwrap(),
            "http://127.0.0.1:3000".parse::<HeaderValue>().unwrap(),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Desktop automation endpoints
        .route("/api/desktop/click", post(desktop::click))
        .route("/api/desktop/type", post(desktop::type_text))
        .route("/api/desktop/press", post(desktop::press))
        .route("/api/desktop/screenshot", post(desktop::screenshot))
        .route("/api/desktop/windows", get(desktop::list_windows))
        .route("/api/desktop/focus", post(desktop::focus))
        .route("/api/desktop/locate-image", post(desktop::locate_image))
        .route("/api/desktop/click-image", post(desktop::click_image))
        .layer(cors)
        .with_state(state)
}
