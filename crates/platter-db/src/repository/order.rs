//! # Order Repository
//!
//! The order placement workflow, the status machine write path, and the
//! order read paths.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Placement                                   │
//! │                                                                         │
//! │  place_order(req)                       ┌── ONE TRANSACTION ──┐        │
//! │     │                                                                   │
//! │     ├── validate line item shape        (before any I/O)               │
//! │     ├── resolve customer                → CustomerNotFound             │
//! │     ├── resolve restaurant              → RestaurantNotFound           │
//! │     ├── INSERT order (Placed, total 0)  (stable id for the lines)      │
//! │     ├── per line item, in input order:                                 │
//! │     │     ├── load menu item            → ItemUnavailable              │
//! │     │     ├── snapshot unit price, total += price × quantity           │
//! │     │     └── INSERT order_item                                        │
//! │     ├── UPDATE order total                                             │
//! │     └── COMMIT                          └─────────────────────┘        │
//! │                                                                         │
//! │  Any error before COMMIT rolls everything back: readers observe        │
//! │  either no order or a fully-priced, fully-itemized order.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult, OrderError};
use platter_core::{
    validation, CoreError, Money, NewOrder, Order, OrderDetail, OrderItem, OrderItemDetail,
    OrderStatus,
};

/// Repository for order database operations.
///
/// Owns the only multi-statement write sequence in the system, which is
/// why the transaction lives here rather than in the handlers.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    // =========================================================================
    // Workflow Engine
    // =========================================================================

    /// Places an order: validates the request, materializes each line
    /// item against the current menu item price and availability,
    /// accumulates the total, and persists everything atomically.
    ///
    /// ## Guarantees
    /// - `total_cents` equals the sum of `unit_price_cents × quantity`
    ///   over the persisted order items
    /// - Unit prices are snapshotted at placement time; later menu
    ///   edits never alter this order
    /// - On any failure, no order or order-item row remains visible
    ///
    /// ## Errors
    /// * `OrderError::Core` - empty items, bad quantity
    /// * `OrderError::CustomerNotFound` / `RestaurantNotFound`
    /// * `OrderError::ItemUnavailable` - menu item missing or disabled
    /// * `OrderError::Db` - underlying persistence failure
    pub async fn place_order(&self, req: &NewOrder) -> Result<OrderDetail, OrderError> {
        validation::validate_line_items(&req.items)?;

        debug!(
            customer_id = %req.customer_id,
            restaurant_id = %req.restaurant_id,
            lines = req.items.len(),
            "Placing order"
        );

        // The whole placement is one unit of work. Dropping `tx` on any
        // early return rolls back everything written so far.
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let customer_exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)")
                .bind(req.customer_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(DbError::from)?;
        if customer_exists == 0 {
            return Err(OrderError::CustomerNotFound(req.customer_id));
        }

        let restaurant = sqlx::query_as::<_, platter_core::Restaurant>(
            r#"
            SELECT id, name, location, created_at
            FROM restaurants
            WHERE id = ?1
            "#,
        )
        .bind(req.restaurant_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DbError::from)?
        .ok_or(OrderError::RestaurantNotFound(req.restaurant_id))?;

        let now = Utc::now();

        // Provisional order row: Placed with total 0, so the line items
        // have a stable id to reference.
        let result = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, restaurant_id, status, total_cents,
                                created_at, updated_at)
            VALUES (?1, ?2, ?3, 0, ?4, ?4)
            "#,
        )
        .bind(req.customer_id)
        .bind(req.restaurant_id)
        .bind(OrderStatus::Placed)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        let order_id = result.last_insert_rowid();

        let mut total = Money::zero();
        let mut items = Vec::with_capacity(req.items.len());

        for line in &req.items {
            let menu_item = sqlx::query_as::<_, platter_core::MenuItem>(
                r#"
                SELECT id, restaurant_id, name, price_cents, is_available,
                       created_at, updated_at
                FROM menu_items
                WHERE id = ?1
                "#,
            )
            .bind(line.menu_item_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(DbError::from)?
            .filter(|item| item.can_order())
            .ok_or(OrderError::ItemUnavailable {
                menu_item_id: line.menu_item_id,
            })?;

            total += menu_item.price().multiply_quantity(line.quantity);

            let result = sqlx::query(
                r#"
                INSERT INTO order_items (order_id, menu_item_id, quantity,
                                         unit_price_cents, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(order_id)
            .bind(line.menu_item_id)
            .bind(line.quantity)
            .bind(menu_item.price_cents)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

            items.push(OrderItemDetail {
                item: OrderItem {
                    id: result.last_insert_rowid(),
                    order_id,
                    menu_item_id: line.menu_item_id,
                    quantity: line.quantity,
                    unit_price_cents: menu_item.price_cents,
                    created_at: now,
                },
                menu_item,
            });
        }

        sqlx::query("UPDATE orders SET total_cents = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(order_id)
            .bind(total.cents())
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        info!(
            order_id = %order_id,
            total = %total,
            lines = items.len(),
            "Order placed"
        );

        Ok(OrderDetail {
            order: Order {
                id: order_id,
                customer_id: req.customer_id,
                restaurant_id: req.restaurant_id,
                status: OrderStatus::Placed,
                total_cents: total.cents(),
                created_at: now,
                updated_at: now,
            },
            items,
            restaurant,
        })
    }

    // =========================================================================
    // Status Machine
    // =========================================================================

    /// Updates an order's status after checking the transition table.
    ///
    /// ## Errors
    /// * `OrderError::OrderNotFound` - order id doesn't resolve
    /// * `OrderError::Core(InvalidStatusTransition)` - illegal move,
    ///   including anything out of `Completed` or `Cancelled`
    pub async fn update_status(
        &self,
        order_id: i64,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        debug!(order_id = %order_id, status = %new_status, "Updating order status");

        let order = self
            .get_by_id(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if !order.status.can_transition_to(new_status) {
            return Err(CoreError::InvalidStatusTransition {
                from: order.status,
                to: new_status,
            }
            .into());
        }

        let now = Utc::now();

        // Guard on the status we validated against so a concurrent
        // transition can't be silently overwritten.
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = ?2, updated_at = ?3
            WHERE id = ?1 AND status = ?4
            "#,
        )
        .bind(order_id)
        .bind(new_status)
        .bind(now)
        .bind(order.status)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(
                DbError::TransactionFailed("order status changed concurrently".to_string()).into(),
            );
        }

        info!(order_id = %order_id, from = %order.status, to = %new_status, "Order status updated");

        Ok(Order {
            status: new_status,
            updated_at: now,
            ..order
        })
    }

    // =========================================================================
    // Read Paths
    // =========================================================================

    /// Gets an order row by ID (no eager loading).
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, restaurant_id, status, total_cents,
                   created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all items of an order, in insertion order.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, menu_item_id, quantity, unit_price_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an order with its items (each resolved to its menu item)
    /// and its restaurant eagerly loaded.
    pub async fn get_detail(&self, id: i64) -> DbResult<Option<OrderDetail>> {
        let Some(order) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.load_detail(order).await?))
    }

    /// Lists all orders of a customer, oldest first, each with the
    /// full detail shape.
    pub async fn list_by_customer(&self, customer_id: i64) -> DbResult<Vec<OrderDetail>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, restaurant_id, status, total_cents,
                   created_at, updated_at
            FROM orders
            WHERE customer_id = ?1
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.load_detail(order).await?);
        }

        Ok(details)
    }

    /// Resolves an order row into the full detail shape.
    ///
    /// Foreign keys guarantee the restaurant and menu items exist, so a
    /// miss here is a storage-level inconsistency, not a client error.
    async fn load_detail(&self, order: Order) -> DbResult<OrderDetail> {
        let restaurant = sqlx::query_as::<_, platter_core::Restaurant>(
            r#"
            SELECT id, name, location, created_at
            FROM restaurants
            WHERE id = ?1
            "#,
        )
        .bind(order.restaurant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Restaurant", order.restaurant_id))?;

        let items = self.get_items(order.id).await?;

        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let menu_item = sqlx::query_as::<_, platter_core::MenuItem>(
                r#"
                SELECT id, restaurant_id, name, price_cents, is_available,
                       created_at, updated_at
                FROM menu_items
                WHERE id = ?1
                "#,
            )
            .bind(item.menu_item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", item.menu_item_id))?;

            resolved.push(OrderItemDetail { item, menu_item });
        }

        Ok(OrderDetail {
            order,
            items: resolved,
            restaurant,
        })
    }

    /// Counts all order rows (test support / diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts all order item rows (test support / diagnostics).
    pub async fn count_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
