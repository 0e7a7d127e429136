//! Restaurant registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use platter_core::{validation, Restaurant};

use crate::error::ApiError;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurant {
    pub name: String,
    pub location: String,
}

/// `POST /restaurants`
///
/// Registers a restaurant. Names are unique across all restaurants.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRestaurant>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    validation::validate_name("name", &req.name)?;
    validation::validate_address("location", &req.location)?;

    if state.db.restaurants().find_by_name(&req.name).await?.is_some() {
        return Err(ApiError::duplicate(format!(
            "name '{}' already exists",
            req.name
        )));
    }

    let restaurant = state
        .db
        .restaurants()
        .insert(&req.name, &req.location)
        .await?;

    info!(restaurant_id = restaurant.id, "Restaurant registered");

    Ok((StatusCode::CREATED, Json(restaurant)))
}
