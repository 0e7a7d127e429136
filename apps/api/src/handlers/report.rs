//! Reporting endpoints: revenue, best seller, most active customers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use platter_core::{TopCustomer, TopMenuItem, DEFAULT_TOP_CUSTOMERS};

use crate::handlers::ApiResult;
use crate::state::AppState;

/// Revenue response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub revenue_cents: i64,
}

/// Query string for the top-customers ranking.
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<u32>,
}

/// `GET /restaurants/{id}/revenue`
///
/// Lifetime revenue of a restaurant: the sum of all its order totals.
/// A restaurant with no orders (or an unknown id) reports zero.
pub async fn revenue(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> ApiResult<Revenue> {
    let revenue = state
        .db
        .reports()
        .revenue_for_restaurant(restaurant_id)
        .await?;

    Ok(Json(Revenue {
        revenue_cents: revenue.cents(),
    }))
}

/// `GET /menu/top-items`
///
/// The single best-selling menu item platform-wide, or `null` before
/// any order exists.
pub async fn top_menu_item(State(state): State<AppState>) -> ApiResult<Option<TopMenuItem>> {
    let top = state.db.reports().top_menu_item().await?;
    Ok(Json(top))
}

/// `GET /customers/top?limit=`
///
/// Customers ranked by number of orders placed, most active first.
pub async fn top_customers(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> ApiResult<Vec<TopCustomer>> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_CUSTOMERS);
    let ranked = state.db.reports().top_customers(limit).await?;
    Ok(Json(ranked))
}
