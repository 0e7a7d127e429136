//! # API Error Types
//!
//! Translates domain and persistence errors into HTTP responses.
//!
//! ## Response Shape
//! Every error, on every route, is a JSON body:
//! ```json
//! { "code": "DUPLICATE", "message": "email 'a@x.com' already exists" }
//! ```
//!
//! ## Status Mapping
//! ```text
//! validation / duplicate / bad reference / unavailable item  → 400
//! unknown resource on reads and status updates               → 404
//! illegal status transition                                  → 422
//! persistence failure                                        → 500 (generic
//!                                   message, full detail goes to the log)
//! ```
//!
//! Order placement maps missing customers and restaurants to 400, not
//! 404: the URL resolved fine, the request body referenced something
//! that doesn't exist.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use platter_core::{CoreError, ValidationError};
use platter_db::{DbError, OrderError};

/// Machine-readable error categories for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or out-of-range input.
    Validation,
    /// Unique field already taken (email, phone, restaurant name).
    Duplicate,
    /// The addressed resource does not exist.
    NotFound,
    /// A request body referenced an entity that does not exist.
    BadReference,
    /// A line item's menu item is missing or unavailable.
    ItemUnavailable,
    /// The requested status change is not legal.
    InvalidTransition,
    /// Unexpected server-side failure.
    Internal,
}

/// A client-facing API error: HTTP status plus `{code, message}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    /// 404 with a NOT_FOUND code.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
    }

    /// 400 with a DUPLICATE code.
    pub fn duplicate(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, ErrorCode::Duplicate, message)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::Duplicate { .. } => ErrorCode::Duplicate,
            _ => ErrorCode::Validation,
        };
        ApiError::new(StatusCode::BAD_REQUEST, code, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidStatusTransition { .. } => ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::InvalidTransition,
                err.to_string(),
            ),
            CoreError::Validation(v) => v.into(),
            CoreError::EmptyOrder
            | CoreError::TooManyItems { .. }
            | CoreError::QuantityTooLarge { .. } => ApiError::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::Validation,
                err.to_string(),
            ),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } => ApiError::duplicate(err.to_string()),
            DbError::ForeignKeyViolation { .. } => ApiError::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadReference,
                err.to_string(),
            ),
            // Infrastructure failures: log the detail, keep the
            // response generic.
            other => {
                error!(error = %other, "Database error");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Internal,
                    "Internal server error",
                )
            }
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::CustomerNotFound(_) | OrderError::RestaurantNotFound(_) => ApiError::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadReference,
                err.to_string(),
            ),
            OrderError::OrderNotFound(_) => ApiError::not_found(err.to_string()),
            OrderError::ItemUnavailable { .. } => ApiError::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::ItemUnavailable,
                err.to_string(),
            ),
            OrderError::Core(core) => core.into(),
            OrderError::Db(db) => db.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
