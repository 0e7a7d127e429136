//! # Report Repository
//!
//! Read-only aggregation queries over historical orders.
//!
//! ## Key Operations
//! - Revenue per restaurant (sum of stored order totals)
//! - Best-selling menu item across the platform
//! - Most active customers by order count
//!
//! All rankings break ties by the lowest id so results are stable
//! across runs. Aggregates read the stored `total_cents` and the
//! snapshotted order items, so menu edits after placement never move
//! historical numbers.

use sqlx::SqlitePool;

use crate::error::{DbError, DbResult};
use platter_core::{Customer, MenuItem, Money, TopCustomer, TopMenuItem};

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Total revenue of a restaurant: the sum of all its order totals,
    /// regardless of order status.
    ///
    /// Returns zero for a restaurant with no orders (and for an unknown
    /// restaurant id; callers verify existence when they need a 404).
    pub async fn revenue_for_restaurant(&self, restaurant_id: i64) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_cents), 0)
            FROM orders
            WHERE restaurant_id = ?1
            "#,
        )
        .bind(restaurant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// The single best-selling menu item across all orders, by total
    /// quantity sold. Ties go to the lowest menu item id.
    ///
    /// Returns `None` when no order items exist yet.
    pub async fn top_menu_item(&self) -> DbResult<Option<TopMenuItem>> {
        let top = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT menu_item_id, SUM(quantity) AS quantity_sold
            FROM order_items
            GROUP BY menu_item_id
            ORDER BY quantity_sold DESC, menu_item_id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some((menu_item_id, quantity_sold)) = top else {
            return Ok(None);
        };

        // Order items reference menu items by foreign key, so a miss
        // here is a storage-level inconsistency.
        let menu_item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, restaurant_id, name, price_cents, is_available,
                   created_at, updated_at
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(menu_item_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("MenuItem", menu_item_id))?;

        Ok(Some(TopMenuItem {
            menu_item,
            quantity_sold,
        }))
    }

    /// The most active customers by number of orders placed, up to
    /// `limit` rows. Customers with no orders never appear. Ties go to
    /// the lowest customer id.
    pub async fn top_customers(&self, limit: u32) -> DbResult<Vec<TopCustomer>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT customer_id, COUNT(*) AS order_count
            FROM orders
            GROUP BY customer_id
            ORDER BY order_count DESC, customer_id ASC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        let mut ranked = Vec::with_capacity(rows.len());
        for (customer_id, order_count) in rows {
            let customer = sqlx::query_as::<_, Customer>(
                r#"
                SELECT id, name, email, phone_number, address, created_at
                FROM customers
                WHERE id = ?1
                "#,
            )
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", customer_id))?;

            ranked.push(TopCustomer {
                customer,
                order_count,
            });
        }

        Ok(ranked)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
