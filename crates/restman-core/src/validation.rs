//! # Validation Module
//!
//! Input validation for names, prices, quantities and party sizes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screens                                                      │
//! │  └── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Shape of the input (non-empty, non-negative, ordered bounds)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Restaurant commands                                          │
//! │  └── Business rules (stock, state machine, roles)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::MAX_PARTY_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest name accepted for menu items, ingredients and employees.
const MAX_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// ## Example
/// ```rust
/// use restman_core::validation::validate_name;
///
/// assert_eq!(validate_name("item", "  Burger ").unwrap(), "Burger");
/// assert!(validate_name("item", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price or unit cost. Zero is allowed (free sides).
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity or threshold.
pub fn validate_quantity(field: &str, quantity: Quantity) -> ValidationResult<()> {
    if quantity.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates recipe bounds for one ingredient of a menu item.
///
/// ## Rules
/// - `0 <= min <= default <= max`
pub fn validate_bounds(
    field: &str,
    min: Quantity,
    default: Quantity,
    max: Quantity,
) -> ValidationResult<()> {
    validate_quantity(field, min)?;

    if min > default || default > max {
        return Err(ValidationError::InvalidBounds {
            field: field.to_string(),
            min,
            default,
            max,
        });
    }

    Ok(())
}

/// Validates how many customers are seated at once.
///
/// ## Rules
/// - At least 1
/// - At most MAX_PARTY_SIZE (50)
pub fn validate_party_size(count: u32) -> ValidationResult<()> {
    if count == 0 || count > MAX_PARTY_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "number of customers".to_string(),
            min: 1,
            max: MAX_PARTY_SIZE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
