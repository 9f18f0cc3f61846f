//! # Error Types
//!
//! Domain-specific error types for restman-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  restman-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  restman-store errors (separate crate)                                 │
//! │  └── StoreError       - File, JSON and config failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller shows a message            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Expected business conditions (not enough cheese, order already
//!    delivered) are `Err` values, never panics
//! 2. Include context in error messages (ingredient, order id, state)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::customer::TableId;
use crate::order::{OrderId, OrderState};
use crate::quantity::Quantity;
use crate::staff::{EmployeeId, EmployeeRole};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No catalog item with this name.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// A catalog item with this name already exists.
    #[error("Menu item '{0}' already exists")]
    DuplicateMenuItem(String),

    /// No live order with this id.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// No table with this id.
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// No customer with this id at the table.
    #[error("Customer {customer_id} not found at table {table_id}")]
    CustomerNotFound { table_id: TableId, customer_id: u32 },

    /// No employee with this id.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// The employee cannot perform this action.
    #[error("Employee {employee_id} is a {actual}, expected a {expected}")]
    WrongRole {
        employee_id: EmployeeId,
        expected: EmployeeRole,
        actual: EmployeeRole,
    },

    /// Stock does not cover the order.
    ///
    /// ## User Workflow
    /// ```text
    /// Server picks "burger" (needs 4 cheese)
    ///      │
    ///      ▼
    /// Ledger: cheese on hand = 3
    ///      │
    ///      ▼
    /// InsufficientStock { ingredient: "cheese", available: 3.00, requested: 4.00 }
    ///      │
    ///      ▼
    /// Screen shows: "Not enough cheese"
    /// ```
    #[error("Insufficient stock for {ingredient}: available {available}, requested {requested}")]
    InsufficientStock {
        ingredient: String,
        available: Quantity,
        requested: Quantity,
    },

    /// A stock level can never be set below zero.
    #[error("Stock for {ingredient} cannot be set to {quantity}")]
    NegativeStock {
        ingredient: String,
        quantity: Quantity,
    },

    /// The change would take a stock level past what can be represented.
    #[error("Stock for {ingredient} cannot change by {change} from {current}")]
    StockOverflow {
        ingredient: String,
        current: Quantity,
        change: Quantity,
    },

    /// Customisation outside the recipe's bounds.
    #[error("{ingredient} quantity {requested} is outside {min}..={max}")]
    QuantityOutOfBounds {
        ingredient: String,
        requested: Quantity,
        min: Quantity,
        max: Quantity,
    },

    /// The item's recipe does not use this ingredient.
    #[error("{item} does not contain {ingredient}")]
    IngredientNotInItem { item: String, ingredient: String },

    /// The state machine does not allow this step.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: OrderId,
        from: OrderState,
        to: OrderState,
    },

    /// Ingredients can only be customised before the order is placed.
    #[error("Order {order_id} is {state} and can no longer be edited")]
    OrderNotEditable { order_id: OrderId, state: OrderState },

    /// The cook finishing an order is not the one preparing it.
    #[error("Order {order_id} is not being prepared by employee {employee_id}")]
    OrderNotClaimed {
        order_id: OrderId,
        employee_id: EmployeeId,
    },

    /// Billing a table while food is still on its way.
    #[error("Table {table_id} still has {open} undelivered order(s)")]
    TableHasOpenOrders { table_id: TableId, open: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Recipe bounds are not ordered `min <= default <= max`.
    #[error("{field} requires min <= default <= max, got {min} / {default} / {max}")]
    InvalidBounds {
        field: String,
        min: Quantity,
        default: Quantity,
        max: Quantity,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
