//! # Validation Module
//!
//! Input validation utilities for the Platter ordering backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (serde)                                        │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Rejects malformed JSON before any handler runs                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (business rule validation)                       │
//! │  ├── Field formats, lengths, ranges                                    │
//! │  └── Line item shape checks before the workflow engine runs           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (email, phone, restaurant name)                │
//! │  └── Foreign key + CHECK constraints                                   │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, ValidationError};
use crate::types::LineItem;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for a single menu item price: $100,000.00.
/// Catches unit mix-ups (sending fractional dollars scaled twice).
const MAX_PRICE_CENTS: i64 = 10_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (customer, restaurant, or menu item).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use platter_core::validation::validate_name;
///
/// assert!(validate_name("name", "Margherita Pizza").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    // Character count, not bytes: multibyte names get the full limit.
    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one `@` with text on both sides
/// - Must be at most 254 characters
///
/// Deliberately shallow: the mailbox is the real validator, this only
/// rejects obviously broken input.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.chars().count() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like user@domain".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Digits, spaces, and `+ - ( )` only
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phoneNumber".to_string(),
        });
    }

    if phone.chars().count() > 20 {
        return Err(ValidationError::TooLong {
            field: "phoneNumber".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phoneNumber".to_string(),
            reason: "must contain only digits, spaces, and + - ( )".to_string(),
        });
    }

    Ok(())
}

/// Validates a free-form address or location string.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 500 characters
pub fn validate_address(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > 500 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a menu item price in cents.
///
/// ## Rules
/// - Must be non-negative (free items are legal, negative prices are not)
/// - Must not exceed MAX_PRICE_CENTS
pub fn validate_price_cents(price_cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&price_cents) {
        return Err(ValidationError::OutOfRange {
            field: "priceCents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Order Shape Validation
// =============================================================================

/// Validates the shape of an order's line items before the workflow
/// engine touches the database.
///
/// ## Rules
/// - At least one line item (an order with nothing in it is never
///   accepted)
/// - At most MAX_ORDER_ITEMS lines
/// - Every quantity positive and within bounds
pub fn validate_line_items(items: &[LineItem]) -> Result<(), CoreError> {
    if items.is_empty() {
        return Err(CoreError::EmptyOrder);
    }

    if items.len() > MAX_ORDER_ITEMS {
        return Err(CoreError::TooManyItems {
            max: MAX_ORDER_ITEMS,
        });
    }

    for line in items {
        if line.quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Pizza Palace").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"x".repeat(201)).is_err());
    }

    #[test]
    fn test_length_limits_count_characters_not_bytes() {
        // 150 two-byte characters: within the 200-character limit even
        // though it is 300 bytes.
        let name = "é".repeat(150);
        assert!(validate_name("name", &name).is_ok());
        assert!(validate_name("name", &"é".repeat(201)).is_err());

        let address = "中".repeat(400);
        assert!(validate_address("address", &address).is_ok());
        assert!(validate_address("address", &"中".repeat(501)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("1").is_ok());
        assert!(validate_phone_number("+1 (555) 123-4567").is_ok());
        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("phone#1").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1000).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_line_items_rejects_empty() {
        let err = validate_line_items(&[]).unwrap_err();
        assert!(matches!(err, CoreError::EmptyOrder));
    }

    #[test]
    fn test_validate_line_items_rejects_bad_quantity() {
        let items = [LineItem {
            menu_item_id: 1,
            quantity: 0,
        }];
        assert!(validate_line_items(&items).is_err());

        let items = [LineItem {
            menu_item_id: 1,
            quantity: 5000,
        }];
        assert!(matches!(
            validate_line_items(&items).unwrap_err(),
            CoreError::QuantityTooLarge { .. }
        ));
    }

    #[test]
    fn test_validate_line_items_accepts_normal_order() {
        let items = [
            LineItem {
                menu_item_id: 1,
                quantity: 2,
            },
            LineItem {
                menu_item_id: 2,
                quantity: 1,
            },
        ];
        assert!(validate_line_items(&items).is_ok());
    }
}
