//! # Domain Types
//!
//! Core domain types for the Platter ordering backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │   Restaurant    │   │    MenuItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  email (unique) │   │  name (unique)  │   │  restaurant_id  │       │
//! │  │  phone (unique) │   │  location       │   │  price_cents    │       │
//! │  │  address        │   └─────────────────┘   │  is_available   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │   OrderItem     │   │   OrderStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  customer_id    │   │  order_id (FK)  │   │  Placed         │       │
//! │  │  restaurant_id  │   │  menu_item_id   │   │  Preparing      │       │
//! │  │  status         │   │  quantity       │   │  Completed      │       │
//! │  │  total_cents    │   │  unit_price ◄───┼── │  Cancelled      │       │
//! │  └─────────────────┘   │  (snapshot)     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pricing
//! `OrderItem.unit_price_cents` copies the menu item price at placement
//! time. Later menu price edits never retroactively alter historical
//! orders or their totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
///
/// Created once via registration; immutable thereafter in this core.
/// `email` and `phone_number` are each unique across all customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (database-assigned).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Email address - unique across all customers.
    pub email: String,

    /// Phone number - unique across all customers.
    pub phone_number: String,

    /// Delivery address.
    pub address: String,

    /// When the customer registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Restaurant
// =============================================================================

/// A registered restaurant. Owns a collection of menu items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Unique identifier (database-assigned).
    pub id: i64,

    /// Restaurant name - unique across all restaurants.
    pub name: String,

    /// Physical location.
    pub location: String,

    /// When the restaurant registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A priced, availability-gated item on a restaurant's menu.
///
/// Price and availability are mutated independently of orders via
/// direct field updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique identifier (database-assigned).
    pub id: i64,

    /// Owning restaurant.
    pub restaurant_id: i64,

    /// Display name shown on the menu.
    pub name: String,

    /// Price in cents (smallest currency unit), never negative.
    pub price_cents: i64,

    /// Whether the item can currently be ordered.
    pub is_available: bool,

    /// When the item was added to the menu.
    pub created_at: DateTime<Utc>,

    /// When price or availability was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the item can be ordered right now.
    #[inline]
    pub fn can_order(&self) -> bool {
        self.is_available
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// ## State Machine
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                     Order Status Transitions                            │
/// │                                                                         │
/// │          ┌──────────► Preparing ──────────► Completed (terminal)       │
/// │          │                │                                             │
/// │       Placed             │                                             │
/// │          │                ▼                                             │
/// │          └──────────► Cancelled (terminal)                             │
/// │                                                                         │
/// │  Initial state is always Placed. Terminal states reject further        │
/// │  transitions.                                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order has been placed and fully priced.
    Placed,
    /// The restaurant is preparing the order.
    Preparing,
    /// Order was fulfilled.
    Completed,
    /// Order was cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Returns the lowercase wire/storage name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Checks if this status accepts no further transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Checks whether a transition to `next` is legal.
    ///
    /// ## Transition Table
    /// - `Placed` → `Preparing` or `Cancelled`
    /// - `Preparing` → `Completed` or `Cancelled`
    /// - `Completed` / `Cancelled` → nothing
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Placed, OrderStatus::Preparing)
                | (OrderStatus::Placed, OrderStatus::Cancelled)
                | (OrderStatus::Preparing, OrderStatus::Completed)
                | (OrderStatus::Preparing, OrderStatus::Cancelled)
        )
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a status from its lowercase wire name.
///
/// Used at the API boundary so an unknown status is rejected with a
/// validation error before reaching the workflow.
impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placed" => Ok(OrderStatus::Placed),
            "preparing" => Ok(OrderStatus::Preparing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: "must be one of: placed, preparing, completed, cancelled".to_string(),
            }),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// `total_cents` is derived from the order items at placement time and
/// is never client-supplied. `status` is the only field mutated after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (database-assigned).
    pub id: i64,

    /// Customer who placed the order.
    pub customer_id: i64,

    /// Restaurant the order was placed against.
    pub restaurant_id: i64,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Sum of `unit_price_cents × quantity` over the order items,
    /// computed at placement time.
    pub total_cents: i64,

    /// When the order was placed.
    pub created_at: DateTime<Utc>,

    /// When the order was last updated (status changes).
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line of an order, referencing a menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique identifier (database-assigned).
    pub id: i64,

    /// Owning order.
    pub order_id: i64,

    /// Referenced menu item.
    pub menu_item_id: i64,

    /// Units ordered, always positive.
    pub quantity: i64,

    /// Menu item price snapshotted at placement time.
    pub unit_price_cents: i64,

    /// When the line was written (same instant as the order).
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the snapshotted unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns `unit_price × quantity` for this line.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order Request Types
// =============================================================================

/// A (menu item, quantity) pair supplied when placing an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// A validated order placement request handed to the workflow engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub items: Vec<LineItem>,
}

// =============================================================================
// Read Models
// =============================================================================

/// An order item resolved to its menu item (read-side eager load).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,

    /// The referenced menu item as it exists now. Pricing on the order
    /// uses the snapshot in `item`, not this record.
    pub menu_item: MenuItem,
}

/// A fully materialized order: the order row, its items each resolved
/// to its menu item, plus the restaurant. A read-only convenience, not
/// a write invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,

    pub items: Vec<OrderItemDetail>,

    pub restaurant: Restaurant,
}

impl OrderDetail {
    /// Recomputes the total from the line items.
    ///
    /// Always equals `order.total()` for a committed order; exposed for
    /// consistency checks in tests.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(|line| line.item.line_total()).sum()
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// The menu item with the highest total quantity sold.
///
/// Ties are broken by lowest menu item id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMenuItem {
    pub menu_item: MenuItem,
    pub quantity_sold: i64,
}

/// One row of the top-customers-by-order-count ranking.
///
/// Ties are broken by lowest customer id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub customer: Customer,
    pub order_count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_initial_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Placed);
    }

    #[test]
    fn test_status_transition_table() {
        use OrderStatus::*;

        assert!(Placed.can_transition_to(Preparing));
        assert!(Placed.can_transition_to(Cancelled));
        assert!(Preparing.can_transition_to(Completed));
        assert!(Preparing.can_transition_to(Cancelled));

        // Skipping preparation is not allowed.
        assert!(!Placed.can_transition_to(Completed));
        // Terminal states reject everything.
        assert!(!Completed.can_transition_to(Preparing));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Placed));
        // Self-transitions are not legal either.
        assert!(!Placed.can_transition_to(Placed));
    }

    #[test]
    fn test_status_terminal() {
        assert!(!OrderStatus::Placed.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Preparing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: 1,
            order_id: 1,
            menu_item_id: 7,
            quantity: 3,
            unit_price_cents: 450,
            created_at: chrono::Utc::now(),
        };
        assert_eq!(item.line_total().cents(), 1350);
    }
}
