//! # Order Notification Bus
//!
//! How an order tells its collaborators that its state changed.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order.set_state(READY)                                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Notification { #7, READY, [Server(2), Customer(1/1), OrderIndex,      │
//! │                               Inventory, Cook(3)] }                     │
//! │        │                                                                │
//! │        ▼  Restaurant::publish, in subscription order                    │
//! │  ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌───────────┐ ┌──────────┐   │
//! │  │ Pickup   │ │ Customer │ │ OrderIndex │ │ Ledger    │ │ Kitchen  │   │
//! │  │ queue    │ │ lists    │ │            │ │           │ │ queue    │   │
//! │  └──────────┘ └──────────┘ └────────────┘ └───────────┘ └──────────┘   │
//! │        │            │             │             │             │         │
//! │        └────────────┴─────────────┴──────┬──────┴─────────────┘         │
//! │                                          ▼                              │
//! │                                   Vec<Effect>                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Subscribers are plain ids, never references. Collaborators live in the
//! [`Restaurant`](crate::restaurant::Restaurant) and are looked up when a
//! notification is delivered, so an order can be serialized with its
//! subscriptions and an employee who left is simply skipped.

use serde::{Deserialize, Serialize};

use crate::customer::CustomerRef;
use crate::effect::Effect;
use crate::order::{Order, OrderId, OrderState};
use crate::staff::EmployeeId;

/// A collaborator attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Subscriber {
    /// The server who placed the order (pickup queue).
    Server { employee_id: EmployeeId },
    /// A cook who has seen the order (kitchen queue).
    Cook { employee_id: EmployeeId },
    /// The customer the order belongs to.
    Customer { customer: CustomerRef },
    /// The restaurant-wide order index.
    OrderIndex,
    /// The ingredient ledger.
    Inventory,
}

/// A state change waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub order_id: OrderId,
    pub state: OrderState,
    /// Snapshot of the subscriber list at the time of the change.
    pub subscribers: Vec<Subscriber>,
}

/// Reaction to an order's state change.
///
/// Handlers receive the order after the change, so `order.state() == state`.
/// Anything that must leave the process (log lines, supplier requests) is
/// returned as an [`Effect`] instead of performed.
pub trait OrderObserver {
    fn on_order_state_changed(&mut self, order: &Order, state: OrderState) -> Vec<Effect>;
}
