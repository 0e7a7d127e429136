//! # Restaurant Repository
//!
//! Database operations for restaurants.
//!
//! ## Key Operations
//! - Registration with duplicate-name probing
//! - Point lookups by id
//!
//! Restaurants are never deleted in this core.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use platter_core::Restaurant;

/// Repository for restaurant database operations.
#[derive(Debug, Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    /// Creates a new RestaurantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RestaurantRepository { pool }
    }

    /// Gets a restaurant by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, location, created_at
            FROM restaurants
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(restaurant)
    }

    /// Checks whether a restaurant exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Finds a restaurant by its exact name.
    ///
    /// ## Usage
    /// Uniqueness probe before registration: restaurant names are
    /// unique across all restaurants.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, location, created_at
            FROM restaurants
            WHERE name = ?1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(restaurant)
    }

    /// Inserts a new restaurant.
    ///
    /// ## Returns
    /// * `Ok(Restaurant)` - Inserted restaurant with the database-assigned id
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    pub async fn insert(&self, name: &str, location: &str) -> DbResult<Restaurant> {
        debug!(name = %name, "Inserting restaurant");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO restaurants (name, location, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(name)
        .bind(location)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Restaurant {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            location: location.to_string(),
            created_at: now,
        })
    }

    /// Counts total restaurants (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
