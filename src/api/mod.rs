//! API Module
//!
//! HTTP handlers and routing for the order service REST API.
//!
//! # Endpoints
//! - `GET /ping` - Liveness check
//! - `GET /stats` - Cache statistics
//! - `POST /api/v1/orders` - Publish an order event
//! - `GET /api/v1/orders/:id` - Look up an order by uid

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
