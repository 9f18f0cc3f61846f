//! # restman-core: Order Lifecycle Engine
//!
//! Orders, stock, staff and billing for a single restaurant, with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Restman Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Screens (server, cook, manager)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ restman-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │restaurant │  │   order   │  │ingredient │  │  billing  │  │   │
//! │  │   │ commands  │  │ state +   │  │  ledger   │  │ statement │  │   │
//! │  │   │ dispatch  │  │   bus     │  │  restock  │  │  receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • commands return Vec<Effect>                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Effect (audit line, restock request)   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 restman-store (file layer)                      │   │
//! │  │         log.txt, requests.txt, JSON snapshot, config            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`restaurant`] - The aggregate and every command
//! - [`order`] - Order, OrderState and the transition table
//! - [`bus`] - Subscribers and notification dispatch
//! - [`ingredient`] - Stock ledger, feasibility, restock signals
//! - [`menu`] - Menu items, recipes, catalog
//! - [`customer`] - Tables and customer order lists
//! - [`staff`] - Employees and their queues
//! - [`index`] - Pending and remake pools
//! - [`billing`] - Statements and receipts
//! - [`effect`] - Side effects handed to the store
//! - [`money`] / [`quantity`] - Fixed-point numbers
//!
//! ## Example Usage
//!
//! ```rust
//! use restman_core::prelude::*;
//!
//! let mut r = Restaurant::new();
//! let cheese = r.ledger_mut().ingredient("cheese").clone();
//! let pizza = MenuItem::new("pizza", Money::from_cents(1200))
//!     .unwrap()
//!     .with_ingredient(MenuIngredient::fixed(&cheese, Quantity::from_units(2)).unwrap());
//! r.add_menu_item(pizza).unwrap();
//!
//! // No cheese on hand yet
//! assert!(r.available_menu().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod bus;
pub mod customer;
pub mod effect;
pub mod error;
pub mod index;
pub mod ingredient;
pub mod menu;
pub mod money;
pub mod order;
pub mod quantity;
pub mod restaurant;
pub mod staff;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use quantity::Quantity;
pub use restaurant::Restaurant;

/// Everything a screen needs, in one import.
pub mod prelude {
    pub use crate::billing::{CustomerBill, Statement, TableBill};
    pub use crate::customer::TableId;
    pub use crate::effect::{AuditEvent, Effect, EffectSink};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::ingredient::{Ingredient, RestockSignal};
    pub use crate::menu::{MenuIngredient, MenuItem};
    pub use crate::money::Money;
    pub use crate::order::{Order, OrderId, OrderState};
    pub use crate::quantity::Quantity;
    pub use crate::restaurant::Restaurant;
    pub use crate::staff::{EmployeeId, EmployeeRole};
}

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest party seated in one go.
pub const MAX_PARTY_SIZE: u32 = 50;

/// Stock level at or below which a new ingredient triggers a restock request.
pub const DEFAULT_THRESHOLD: Quantity = Quantity::from_units(10);

/// Amount requested from the supplier per restock signal.
///
/// restman-store overrides this from `[inventory] restock_quantity`.
pub const DEFAULT_RESTOCK_QUANTITY: Quantity = Quantity::from_units(10);
