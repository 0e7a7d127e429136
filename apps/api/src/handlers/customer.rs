//! Customer registration and lookups.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use platter_core::{validation, Customer, OrderDetail};

use crate::error::ApiError;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

/// `POST /customers`
///
/// Registers a customer. Email and phone number must both be unused;
/// a hit on either rejects the whole registration.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    validation::validate_name("name", &req.name)?;
    validation::validate_email(&req.email)?;
    validation::validate_phone_number(&req.phone_number)?;
    validation::validate_address("address", &req.address)?;

    if let Some(existing) = state
        .db
        .customers()
        .find_by_email_or_phone(&req.email, &req.phone_number)
        .await?
    {
        // Name the field that actually collided.
        let (field, value) = if existing.email == req.email {
            ("email", req.email.as_str())
        } else {
            ("phoneNumber", req.phone_number.as_str())
        };
        return Err(ApiError::duplicate(format!(
            "{field} '{value}' already exists"
        )));
    }

    let customer = state
        .db
        .customers()
        .insert(&req.name, &req.email, &req.phone_number, &req.address)
        .await?;

    info!(customer_id = customer.id, "Customer registered");

    Ok((StatusCode::CREATED, Json(customer)))
}

/// `GET /customers/{id}`
///
/// Returns a list holding the customer, or an empty list when the id
/// doesn't resolve. The lookup shape is a filter, not a point read.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<Customer>> {
    let customer = state.db.customers().get_by_id(id).await?;
    Ok(Json(customer.into_iter().collect()))
}

/// `GET /customers/{id}/orders`
///
/// Full order history of a customer, oldest first, each order with its
/// items and restaurant eagerly loaded. An empty history is a 404,
/// same as an unknown customer; the resource here is the order list,
/// and it doesn't exist until an order does.
pub async fn orders(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<OrderDetail>> {
    if !state.db.customers().exists(id).await? {
        return Err(ApiError::not_found(format!("Customer not found: {id}")));
    }

    let orders = state.db.orders().list_by_customer(id).await?;
    if orders.is_empty() {
        return Err(ApiError::not_found(format!(
            "No orders found for customer {id}"
        )));
    }

    Ok(Json(orders))
}
