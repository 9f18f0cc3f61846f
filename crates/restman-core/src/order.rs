//! # Order
//!
//! One customer's order of one menu item, and its life cycle.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CONSTRUCTING ──► PLACED ──► PREPARING ──► READY ──► DELIVERED          │
//! │                     │          ▲    │        │                          │
//! │                     │          │    │        ▼                          │
//! │                     │          └────┼──── REMAKE                        │
//! │                     │               │        │                          │
//! │                     ▼               ▼        ▼                          │
//! │                   CANCEL ◄──────────┴────────┘   (READY → CANCEL too)   │
//! │                                                                         │
//! │  DELIVERED and CANCEL are terminal.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Order::set_state`] itself does not check the table above; the
//! [`Restaurant`](crate::restaurant::Restaurant) commands do, before they
//! change anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::bus::{Notification, Subscriber};
use crate::error::{CoreError, CoreResult};
use crate::ingredient::IngredientLedger;
use crate::menu::{MenuIngredient, MenuItem, Recipe};
use crate::money::Money;
use crate::quantity::Quantity;

// =============================================================================
// Order Id
// =============================================================================

/// Restaurant-wide order number, assigned in sequence from 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct OrderId(u32);

impl OrderId {
    pub const fn new(id: u32) -> Self {
        OrderId(id)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Order State
// =============================================================================

/// Where an order is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum OrderState {
    /// Being customised by the server. Nobody else can see it.
    Constructing,
    /// Sent to the kitchen; ingredients are reserved.
    Placed,
    /// A cook has picked it up.
    Preparing,
    /// Waiting at the pass for the server.
    Ready,
    /// Accepted by the customer. Terminal.
    Delivered,
    /// Sent back by the customer; the kitchen must redo it.
    Remake,
    /// Withdrawn. Terminal.
    Cancel,
}

impl OrderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Delivered | OrderState::Cancel)
    }

    /// Whether the kitchen workflow allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: OrderState) -> bool {
        use OrderState::*;

        match (self, next) {
            (Constructing, Placed) => true,
            (Placed | Remake, Preparing) => true,
            (Preparing, Ready) => true,
            (Ready, Delivered | Remake) => true,
            (Constructing | Placed | Preparing | Ready | Remake, Cancel) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Constructing => "CONSTRUCTING",
            OrderState::Placed => "PLACED",
            OrderState::Preparing => "PREPARING",
            OrderState::Ready => "READY",
            OrderState::Delivered => "DELIVERED",
            OrderState::Remake => "REMAKE",
            OrderState::Cancel => "CANCEL",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order of one menu item.
///
/// The menu item is an instantiated copy of the catalog template, so the
/// customer's ingredient changes never leak back into the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    item: MenuItem,
    notes: Vec<String>,
    state: OrderState,
    subscribers: Vec<Subscriber>,
}

/// Orders are identified by number alone.
impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}

impl Order {
    /// Starts a new order in `Constructing` from a catalog template.
    pub fn new(id: OrderId, template: &MenuItem) -> Self {
        Order {
            id,
            item: template.instantiate(),
            notes: Vec::new(),
            state: OrderState::Constructing,
            subscribers: Vec::new(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn name(&self) -> &str {
        self.item.name()
    }

    /// Base price of the item plus every extra above the defaults.
    pub fn price(&self) -> Money {
        self.item.price() + self.item.extras_cost()
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Notes joined for a single log column, `None` when there are none.
    pub fn notes_line(&self) -> Option<String> {
        if self.notes.is_empty() {
            None
        } else {
            Some(self.notes.join("; "))
        }
    }

    /// Appends a note. Blank notes are ignored.
    pub fn add_note(&mut self, note: &str) {
        let note = note.trim();
        if !note.is_empty() {
            self.notes.push(note.to_string());
        }
    }

    /// Customises one ingredient. Only allowed while the order is being built.
    pub fn set_ingredient_quantity(&mut self, ingredient: &str, quantity: Quantity) -> CoreResult<()> {
        if self.state != OrderState::Constructing {
            return Err(CoreError::OrderNotEditable {
                order_id: self.id,
                state: self.state,
            });
        }
        self.item.ingredient_mut(ingredient)?.set_quantity(quantity)
    }

    /// Re-reads ingredient costs from the ledger. Only an order still being
    /// built changes; a placed order keeps the price it was quoted.
    pub fn refresh_costs(&mut self, ledger: &IngredientLedger) {
        if self.state == OrderState::Constructing {
            self.item.refresh_costs_from(ledger);
        }
    }

    /// Attaches a collaborator. Already attached subscribers are not duplicated.
    pub fn add_observer(&mut self, subscriber: Subscriber) {
        if !self.subscribers.contains(&subscriber) {
            self.subscribers.push(subscriber);
        }
    }

    /// Collaborators in the order they subscribed.
    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    /// Records the new state and returns who must hear about it.
    pub fn set_state(&mut self, state: OrderState) -> Notification {
        self.state = state;
        Notification {
            order_id: self.id,
            state,
            subscribers: self.subscribers.clone(),
        }
    }
}

impl Recipe for Order {
    fn ingredients(&self) -> &[MenuIngredient] {
        self.item.ingredients()
    }
}
