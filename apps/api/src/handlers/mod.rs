//! # Request Handlers
//!
//! One module per resource. Handlers are thin: decode, validate at the
//! boundary, call a repository, translate the result. No SQL and no
//! business rules live here.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;

pub mod customer;
pub mod menu;
pub mod order;
pub mod report;
pub mod restaurant;

/// Handler result: a JSON body or a `{code, message}` error.
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Health probe: verifies the database can still execute queries.
pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.health_check().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    }
}
