//! API Routes
//!
//! Configures the Axum router with all order service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_order_handler, ping_handler, publish_order_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /ping` - Liveness check
/// - `GET /stats` - Cache statistics
/// - `POST /api/v1/orders` - Publish an order event
/// - `GET /api/v1/orders/:id` - Look up an order by uid
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/orders", post(publish_order_handler))
        .route("/orders/:id", get(get_order_handler));

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/stats", get(stats_handler))
        .nest("/api/v1", api_v1)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
