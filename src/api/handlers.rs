//! API Handlers
//!
//! HTTP request handlers for each order service endpoint.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use crate::adapters::EventPublisher;
use crate::error::{Result, ServiceError};
use crate::models::{Order, PublishResponse, StatsResponse};
use crate::service::OrderService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside order lookup
    pub orders: OrderService,
    /// Producer side of the order event stream
    pub events: EventPublisher,
}

impl AppState {
    pub fn new(orders: OrderService, events: EventPublisher) -> Self {
        Self { orders, events }
    }
}

/// Handler for GET /api/v1/orders/:id
pub async fn get_order_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order = state.orders.get_order(&id).await?;
    Ok(Json(Order::clone(&order)))
}

/// Handler for POST /api/v1/orders
///
/// Queues the raw body as an order event. Decoding and validation happen
/// in the ingestion loop, so a malformed order is still accepted here.
pub async fn publish_order_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<PublishResponse>)> {
    state.events.publish(body.to_vec()).await.map_err(|err| {
        error!(error = %err, "failed to publish order event");
        ServiceError::Internal(err.to_string())
    })?;

    Ok((StatusCode::ACCEPTED, Json(PublishResponse::accepted())))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.orders.cache_stats().await.into())
}

/// Handler for GET /ping
pub async fn ping_handler() -> Json<&'static str> {
    Json("pong")
}
