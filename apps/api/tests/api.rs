//! End-to-end API tests driving the router in-process over an
//! in-memory database. No sockets are bound; requests go through
//! `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use platter_api::state::AppState;
use platter_db::{Database, DbConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    platter_api::app(AppState::new(db))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Registers a customer, a restaurant, and a $10.00 pizza.
/// Returns (customer_id, restaurant_id, pizza_id).
async fn seed(app: &Router) -> (i64, i64, i64) {
    let (status, customer) = post(
        app,
        "/customers",
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phoneNumber": "+1 555 0100",
            "address": "1 Loop Lane"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, restaurant) = post(
        app,
        "/restaurants",
        json!({"name": "Pizza Palace", "location": "2 Oven Street"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let restaurant_id = restaurant["id"].as_i64().unwrap();
    let (status, pizza) = post(
        app,
        &format!("/restaurants/{restaurant_id}/menu"),
        json!({"name": "Margherita", "priceCents": 1000}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pizza["isAvailable"], json!(true));

    (
        customer["id"].as_i64().unwrap(),
        restaurant_id,
        pizza["id"].as_i64().unwrap(),
    )
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_probes_database() {
    let app = test_app().await;
    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_customer_registration_and_lookup() {
    let app = test_app().await;
    let (customer_id, _, _) = seed(&app).await;

    // Lookup returns a list holding the one customer.
    let (status, body) = get(&app, &format!("/customers/{customer_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["email"], json!("ada@example.com"));

    // Unknown id: empty list, not an error.
    let (status, body) = get(&app, "/customers/9999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_duplicate_customer_rejected() {
    let app = test_app().await;
    seed(&app).await;

    // Same email, fresh phone.
    let (status, body) = post(
        &app,
        "/customers",
        json!({
            "name": "Imposter",
            "email": "ada@example.com",
            "phoneNumber": "+1 555 0199",
            "address": "9 Other Road"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("DUPLICATE"));

    // Fresh email, same phone.
    let (status, body) = post(
        &app,
        "/customers",
        json!({
            "name": "Imposter",
            "email": "other@example.com",
            "phoneNumber": "+1 555 0100",
            "address": "9 Other Road"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("DUPLICATE"));
}

#[tokio::test]
async fn test_customer_validation() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/customers",
        json!({
            "name": "",
            "email": "a@x.com",
            "phoneNumber": "1",
            "address": "Somewhere"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION"));

    let (status, body) = post(
        &app,
        "/customers",
        json!({
            "name": "Ada",
            "email": "not-an-email",
            "phoneNumber": "1",
            "address": "Somewhere"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION"));
}

#[tokio::test]
async fn test_duplicate_restaurant_name_rejected() {
    let app = test_app().await;
    seed(&app).await;

    let (status, body) = post(
        &app,
        "/restaurants",
        json!({"name": "Pizza Palace", "location": "Elsewhere"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("DUPLICATE"));
}

// =============================================================================
// Menu
// =============================================================================

#[tokio::test]
async fn test_menu_for_unknown_restaurant_is_404() {
    let app = test_app().await;

    let (status, body) = get(&app, "/restaurants/42/menu").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));

    let (status, _) = post(
        &app,
        "/restaurants/42/menu",
        json!({"name": "Ghost Dish", "priceCents": 100}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_item_negative_price_rejected() {
    let app = test_app().await;
    let (_, restaurant_id, _) = seed(&app).await;

    let (status, body) = post(
        &app,
        &format!("/restaurants/{restaurant_id}/menu"),
        json!({"name": "Anti-Pizza", "priceCents": -100}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION"));
}

#[tokio::test]
async fn test_menu_patch_price_only_keeps_availability() {
    let app = test_app().await;
    let (_, _, pizza_id) = seed(&app).await;

    // Disable the item.
    let (status, body) = patch(
        &app,
        &format!("/menu/{pizza_id}"),
        json!({"isAvailable": false}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAvailable"], json!(false));

    // Price-only patch must not resurrect it.
    let (status, body) = patch(
        &app,
        &format!("/menu/{pizza_id}"),
        json!({"priceCents": 1200}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priceCents"], json!(1200));
    assert_eq!(body["isAvailable"], json!(false));
}

#[tokio::test]
async fn test_menu_patch_unknown_item_is_404() {
    let app = test_app().await;
    let (status, body) = patch(&app, "/menu/77", json!({"priceCents": 500})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_place_order_happy_path() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    let (status, body) = post(
        &app,
        "/orders",
        json!({
            "customerId": customer_id,
            "restaurantId": restaurant_id,
            "items": [{"menuItemId": pizza_id, "quantity": 2}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("placed"));
    assert_eq!(body["totalCents"], json!(2000));
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["unitPriceCents"], json!(1000));
    assert_eq!(body["restaurant"]["name"], json!("Pizza Palace"));

    // Readable back through the detail endpoint.
    let order_id = body["id"].as_i64().unwrap();
    let (status, read) = get(&app, &format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["totalCents"], json!(2000));
}

#[tokio::test]
async fn test_place_order_precondition_failures_are_400() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    // Unknown customer.
    let (status, body) = post(
        &app,
        "/orders",
        json!({
            "customerId": 9999,
            "restaurantId": restaurant_id,
            "items": [{"menuItemId": pizza_id, "quantity": 1}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("BAD_REFERENCE"));

    // Unknown restaurant.
    let (status, _) = post(
        &app,
        "/orders",
        json!({
            "customerId": customer_id,
            "restaurantId": 9999,
            "items": [{"menuItemId": pizza_id, "quantity": 1}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty item list.
    let (status, body) = post(
        &app,
        "/orders",
        json!({
            "customerId": customer_id,
            "restaurantId": restaurant_id,
            "items": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION"));
}

#[tokio::test]
async fn test_unavailable_item_rejects_whole_order() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    let (_, soup) = post(
        &app,
        &format!("/restaurants/{restaurant_id}/menu"),
        json!({"name": "Seasonal Soup", "priceCents": 600}),
    )
    .await;
    let soup_id = soup["id"].as_i64().unwrap();
    patch(&app, &format!("/menu/{soup_id}"), json!({"isAvailable": false})).await;

    let (status, body) = post(
        &app,
        "/orders",
        json!({
            "customerId": customer_id,
            "restaurantId": restaurant_id,
            "items": [
                {"menuItemId": pizza_id, "quantity": 1},
                {"menuItemId": soup_id, "quantity": 1}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("ITEM_UNAVAILABLE"));

    // Nothing was persisted: the history is still empty, which reads
    // as 404.
    let (status, body) = get(&app, &format!("/customers/{customer_id}/orders")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_order_status_lifecycle() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    let (_, order) = post(
        &app,
        "/orders",
        json!({
            "customerId": customer_id,
            "restaurantId": restaurant_id,
            "items": [{"menuItemId": pizza_id, "quantity": 1}]
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    // placed → preparing → completed
    let (status, body) = patch(
        &app,
        &format!("/orders/{order_id}/status"),
        json!({"status": "preparing"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("preparing"));

    let (status, body) = patch(
        &app,
        &format!("/orders/{order_id}/status"),
        json!({"status": "completed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("completed"));

    // Terminal state rejects further movement.
    let (status, body) = patch(
        &app,
        &format!("/orders/{order_id}/status"),
        json!({"status": "cancelled"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], json!("INVALID_TRANSITION"));

    // Unknown status word is rejected before the workflow runs.
    let (status, body) = patch(
        &app,
        &format!("/orders/{order_id}/status"),
        json!({"status": "shipped"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION"));

    // Unknown order is a 404.
    let (status, _) = patch(&app, "/orders/9999/status", json!({"status": "preparing"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_order_is_404() {
    let app = test_app().await;
    let (status, body) = get(&app, "/orders/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_customer_order_history() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    // A registered customer with no orders yet has no history
    // resource: 404, not an empty list.
    let (status, body) = get(&app, &format!("/customers/{customer_id}/orders")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));

    for quantity in [1, 3] {
        let (status, _) = post(
            &app,
            "/orders",
            json!({
                "customerId": customer_id,
                "restaurantId": restaurant_id,
                "items": [{"menuItemId": pizza_id, "quantity": quantity}]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, history) = get(&app, &format!("/customers/{customer_id}/orders")).await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["totalCents"], json!(1000));
    assert_eq!(history[1]["totalCents"], json!(3000));

    // Unknown customer gets a 404 here, unlike the bare lookup.
    let (status, _) = get(&app, "/customers/9999/orders").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_revenue_report() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    // No orders yet.
    let (status, body) = get(&app, &format!("/restaurants/{restaurant_id}/revenue")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"revenueCents": 0}));

    post(
        &app,
        "/orders",
        json!({
            "customerId": customer_id,
            "restaurantId": restaurant_id,
            "items": [{"menuItemId": pizza_id, "quantity": 2}]
        }),
    )
    .await;

    let (_, body) = get(&app, &format!("/restaurants/{restaurant_id}/revenue")).await;
    assert_eq!(body, json!({"revenueCents": 2000}));
}

#[tokio::test]
async fn test_top_menu_item_report() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    // Nothing sold yet.
    let (status, body) = get(&app, "/menu/top-items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    post(
        &app,
        "/orders",
        json!({
            "customerId": customer_id,
            "restaurantId": restaurant_id,
            "items": [{"menuItemId": pizza_id, "quantity": 5}]
        }),
    )
    .await;

    let (_, body) = get(&app, "/menu/top-items").await;
    assert_eq!(body["quantitySold"], json!(5));
    assert_eq!(body["menuItem"]["id"], json!(pizza_id));
}

#[tokio::test]
async fn test_top_customers_report() {
    let app = test_app().await;
    let (customer_id, restaurant_id, pizza_id) = seed(&app).await;

    let (_, other) = post(
        &app,
        "/customers",
        json!({
            "name": "Grace",
            "email": "grace@example.com",
            "phoneNumber": "+1 555 0101",
            "address": "2 Loop Lane"
        }),
    )
    .await;
    let other_id = other["id"].as_i64().unwrap();

    // Ada places two orders, Grace one.
    for customer in [customer_id, customer_id, other_id] {
        post(
            &app,
            "/orders",
            json!({
                "customerId": customer,
                "restaurantId": restaurant_id,
                "items": [{"menuItemId": pizza_id, "quantity": 1}]
            }),
        )
        .await;
    }

    let (status, body) = get(&app, "/customers/top").await;
    assert_eq!(status, StatusCode::OK);
    let ranked = body.as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["customer"]["id"], json!(customer_id));
    assert_eq!(ranked[0]["orderCount"], json!(2));
    assert_eq!(ranked[1]["orderCount"], json!(1));

    // Limit truncates the ranking.
    let (_, body) = get(&app, "/customers/top?limit=1").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
