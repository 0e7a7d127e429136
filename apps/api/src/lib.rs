//! # Platter API
//!
//! HTTP API server for the Platter food-ordering backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Client ───► axum Router ───► handlers ───► platter-db ───► SQLite    │
//! │                                   │                                     │
//! │                                   └──────► platter-core (validation)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is exposed as [`app`] so integration tests can drive it
//! with `tower::ServiceExt::oneshot` without binding a socket.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Customers
        .route("/customers", post(handlers::customer::create))
        .route("/customers/top", get(handlers::report::top_customers))
        .route("/customers/{id}", get(handlers::customer::get))
        .route("/customers/{id}/orders", get(handlers::customer::orders))
        // Restaurants and menus
        .route("/restaurants", post(handlers::restaurant::create))
        .route(
            "/restaurants/{id}/menu",
            get(handlers::menu::list).post(handlers::menu::create),
        )
        .route("/restaurants/{id}/revenue", get(handlers::report::revenue))
        .route("/menu/top-items", get(handlers::report::top_menu_item))
        .route("/menu/{id}", patch(handlers::menu::update))
        // Orders
        .route("/orders", post(handlers::order::create))
        .route("/orders/{id}", get(handlers::order::get))
        .route("/orders/{id}/status", patch(handlers::order::update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
