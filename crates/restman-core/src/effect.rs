//! # Effects
//!
//! Side effects produced by restaurant commands.
//!
//! restman-core never touches a file. Commands return the audit lines and
//! supplier requests they would cause as [`Effect`] values, and the caller
//! hands them to an [`EffectSink`] (restman-store provides the file-backed
//! one).
//!
//! ```text
//! Restaurant::place_order(..) ──► Ok(vec![
//!     Effect::Audit(Ingredient { cheese 5.00 → 1.00 }),
//!     Effect::Restock(cheese, 10.00),
//!     Effect::Audit(Order { PLACED, #1 }),
//! ])
//!        │
//!        ▼
//! sink.apply(&effects)   // appends to log.txt, updates requests.txt
//! ```

use serde::{Deserialize, Serialize};

use crate::customer::TableId;
use crate::ingredient::{QuantityChange, RestockSignal};
use crate::money::Money;
use crate::order::{Order, OrderId, OrderState};

/// Something a command wants recorded or requested outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Effect {
    Audit(AuditEvent),
    Restock(RestockSignal),
}

/// One line of the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    Order(OrderEvent),
    Ingredient(QuantityChange),
    Seating(SeatingEvent),
}

/// An order changed state at an employee's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub state: OrderState,
    /// Employee as shown on screen, e.g. `server: alice (#2)`.
    pub employee: String,
    pub order_id: OrderId,
    pub item: String,
    pub price: Money,
    pub notes: Option<String>,
}

impl OrderEvent {
    pub fn new(order: &Order, employee: String) -> Self {
        OrderEvent {
            state: order.state(),
            employee,
            order_id: order.id(),
            item: order.name().to_string(),
            price: order.price(),
            notes: order.notes_line(),
        }
    }
}

/// A party was seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingEvent {
    pub table_id: TableId,
    pub count: u32,
}

/// Receiver for effects. Failures are reported, never raised.
pub trait EffectSink {
    /// Records one audit event. Returns false if it could not be written.
    fn record_audit(&mut self, event: &AuditEvent) -> bool;

    /// Asks the supplier for more stock. Returns false if the request was lost.
    fn request_restock(&mut self, signal: &RestockSignal) -> bool;

    /// Delivers every effect in order and returns how many failed.
    fn apply(&mut self, effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|effect| {
                !match effect {
                    Effect::Audit(event) => self.record_audit(event),
                    Effect::Restock(signal) => self.request_restock(signal),
                }
            })
            .count()
    }
}

/// Sink that keeps everything in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub audits: Vec<AuditEvent>,
    pub restocks: Vec<RestockSignal>,
}

impl EffectSink for RecordingSink {
    fn record_audit(&mut self, event: &AuditEvent) -> bool {
        self.audits.push(event.clone());
        true
    }

    fn request_restock(&mut self, signal: &RestockSignal) -> bool {
        self.restocks.push(signal.clone());
        true
    }
}
