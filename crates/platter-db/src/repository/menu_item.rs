//! # Menu Item Repository
//!
//! Database operations for menu items.
//!
//! ## Key Operations
//! - Adding items to a restaurant's menu
//! - Listing a restaurant's menu
//! - Partial price/availability updates
//!
//! Price and availability changes happen independently of orders.
//! Orders snapshot the price at placement time, so edits here never
//! alter historical orders.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use platter_core::MenuItem;

/// A partial menu item update: only the supplied fields change.
///
/// Mirrors the PATCH body: `price ?? current, isAvailable ?? current`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuItemUpdate {
    pub price_cents: Option<i64>,
    pub is_available: Option<bool>,
}

/// Repository for menu item database operations.
#[derive(Debug, Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    /// Creates a new MenuItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuItemRepository { pool }
    }

    /// Gets a menu item by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, restaurant_id, name, price_cents, is_available,
                   created_at, updated_at
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists all menu items of a restaurant, sorted by name.
    pub async fn list_for_restaurant(&self, restaurant_id: i64) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, restaurant_id, name, price_cents, is_available,
                   created_at, updated_at
            FROM menu_items
            WHERE restaurant_id = ?1
            ORDER BY name
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a new menu item for a restaurant.
    ///
    /// New items start available; availability is toggled via
    /// [`update`](Self::update).
    ///
    /// ## Returns
    /// * `Ok(MenuItem)` - Inserted item with the database-assigned id
    /// * `Err(DbError::ForeignKeyViolation)` - Restaurant doesn't exist
    ///   (callers check existence first for a friendlier error)
    pub async fn insert(
        &self,
        restaurant_id: i64,
        name: &str,
        price_cents: i64,
    ) -> DbResult<MenuItem> {
        debug!(restaurant_id = %restaurant_id, name = %name, price_cents = %price_cents, "Inserting menu item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO menu_items (restaurant_id, name, price_cents, is_available,
                                    created_at, updated_at)
            VALUES (?1, ?2, ?3, 1, ?4, ?4)
            "#,
        )
        .bind(restaurant_id)
        .bind(name)
        .bind(price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(MenuItem {
            id: result.last_insert_rowid(),
            restaurant_id,
            name: name.to_string(),
            price_cents,
            is_available: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update to a menu item.
    ///
    /// Fields left `None` keep their current value; supplying only
    /// `price_cents` leaves `is_available` unchanged and vice versa.
    /// Concurrent updates resolve at last-update-wins granularity.
    ///
    /// ## Returns
    /// * `Ok(MenuItem)` - The updated item
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update(&self, id: i64, update: MenuItemUpdate) -> DbResult<MenuItem> {
        debug!(id = %id, ?update, "Updating menu item");

        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("MenuItem", id))?;

        let price_cents = update.price_cents.unwrap_or(current.price_cents);
        let is_available = update.is_available.unwrap_or(current.is_available);
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                price_cents = ?2,
                is_available = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price_cents)
        .bind(is_available)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        Ok(MenuItem {
            id,
            restaurant_id: current.restaurant_id,
            name: current.name,
            price_cents,
            is_available,
            created_at: current.created_at,
            updated_at: now,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::MenuItemUpdate;
    use crate::pool::{Database, DbConfig};
    use crate::DbError;

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let restaurant = db.restaurants().insert("R", "L").await.unwrap();
        let repo = db.menu_items();

        repo.insert(restaurant.id, "Pizza", 1000).await.unwrap();
        repo.insert(restaurant.id, "Burger", 850).await.unwrap();

        let menu = repo.list_for_restaurant(restaurant.id).await.unwrap();
        assert_eq!(menu.len(), 2);
        // Sorted by name
        assert_eq!(menu[0].name, "Burger");
        assert_eq!(menu[1].name, "Pizza");
        assert!(menu.iter().all(|m| m.is_available));
    }

    #[tokio::test]
    async fn test_insert_requires_existing_restaurant() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.menu_items().insert(999, "Pizza", 1000).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_partial_update_price_only() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let restaurant = db.restaurants().insert("R", "L").await.unwrap();
        let repo = db.menu_items();
        let item = repo.insert(restaurant.id, "Pizza", 1000).await.unwrap();

        // Flip availability off, then patch only the price.
        repo.update(
            item.id,
            MenuItemUpdate {
                price_cents: None,
                is_available: Some(false),
            },
        )
        .await
        .unwrap();

        let updated = repo
            .update(
                item.id,
                MenuItemUpdate {
                    price_cents: Some(1200),
                    is_available: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 1200);
        assert!(!updated.is_available, "price-only patch must not touch availability");
    }

    #[tokio::test]
    async fn test_update_missing_item() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .menu_items()
            .update(42, MenuItemUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
