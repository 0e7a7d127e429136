//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - Registration with duplicate probing (email, phone number)
//! - Point lookups by id
//!
//! Customers are created once and never mutated or deleted in this
//! core; there is deliberately no update or delete here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use platter_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone_number, address, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Checks whether a customer exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Finds a customer holding the given email OR phone number.
    ///
    /// ## Usage
    /// Uniqueness probe before registration: both fields are unique
    /// across all customers, so any hit means the registration must be
    /// rejected.
    pub async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone_number: &str,
    ) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone_number, address, created_at
            FROM customers
            WHERE email = ?1 OR phone_number = ?2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - Inserted customer with the database-assigned id
    /// * `Err(DbError::UniqueViolation)` - Email or phone already taken
    ///   (constraint backstop; callers probe with
    ///   [`find_by_email_or_phone`](Self::find_by_email_or_phone) first)
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        phone_number: &str,
        address: &str,
    ) -> DbResult<Customer> {
        debug!(email = %email, "Inserting customer");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, email, phone_number, address, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone_number)
        .bind(address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
            address: address.to_string(),
            created_at: now,
        })
    }

    /// Counts total customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let customer = repo
            .insert("A", "a@x.com", "1", "Somewhere 1")
            .await
            .unwrap();
        assert!(customer.id > 0);

        let found = repo.get_by_id(customer.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@x.com");
        assert!(repo.exists(customer.id).await.unwrap());
        assert!(!repo.exists(customer.id + 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_uniqueness_probe_matches_either_field() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.insert("A", "a@x.com", "1", "Somewhere 1")
            .await
            .unwrap();

        // Same email, different phone
        let hit = repo.find_by_email_or_phone("a@x.com", "2").await.unwrap();
        assert!(hit.is_some());

        // Same phone, different email
        let hit = repo.find_by_email_or_phone("b@x.com", "1").await.unwrap();
        assert!(hit.is_some());

        // Both free
        let hit = repo.find_by_email_or_phone("b@x.com", "2").await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_hits_constraint_backstop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.insert("A", "a@x.com", "1", "Somewhere 1")
            .await
            .unwrap();
        let err = repo
            .insert("B", "a@x.com", "2", "Somewhere 2")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // The failed insert must not have created a row.
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
