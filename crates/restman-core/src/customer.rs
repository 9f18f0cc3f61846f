//! # Tables and Customers
//!
//! Seating and the per-customer order lists used for billing.
//!
//! ## Customer Order Lists
//! ```text
//! PLACED ─────────► pending  [#3, #5]
//!                      │
//! DELIVERED (#3) ──────┘──► confirmed [#3]      (billed)
//!
//! CANCEL (#5) ──► removed from pending         (never billed)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::bus::OrderObserver;
use crate::effect::{Effect, SeatingEvent};
use crate::error::CoreResult;
use crate::order::{Order, OrderId, OrderState};
use crate::validation::validate_party_size;

/// Table number. Shown plain, e.g. `Table Number: 4`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct TableId(u32);

impl TableId {
    pub const fn new(id: u32) -> Self {
        TableId(id)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address of a customer: which table, which seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub table_id: TableId,
    pub customer_id: u32,
}

// =============================================================================
// Customer
// =============================================================================

/// A seated diner. Ids start at 1 within each table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: u32,
    pending: Vec<OrderId>,
    confirmed: Vec<OrderId>,
}

impl Customer {
    pub fn new(id: u32) -> Self {
        Customer {
            id,
            pending: Vec::new(),
            confirmed: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Orders placed but not yet delivered.
    pub fn pending(&self) -> &[OrderId] {
        &self.pending
    }

    /// Delivered orders; these are what the customer pays for.
    pub fn confirmed(&self) -> &[OrderId] {
        &self.confirmed
    }

    /// Pending followed by confirmed.
    pub fn orders(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.pending.iter().chain(self.confirmed.iter()).copied()
    }

    pub fn has_order(&self, order_id: OrderId) -> bool {
        self.pending.contains(&order_id) || self.confirmed.contains(&order_id)
    }
}

impl OrderObserver for Customer {
    fn on_order_state_changed(&mut self, order: &Order, state: OrderState) -> Vec<Effect> {
        let id = order.id();
        match state {
            OrderState::Placed => {
                if !self.has_order(id) {
                    self.pending.push(id);
                }
            }
            OrderState::Delivered => {
                if let Some(pos) = self.pending.iter().position(|o| *o == id) {
                    self.pending.remove(pos);
                    self.confirmed.push(id);
                }
            }
            OrderState::Cancel => self.pending.retain(|o| *o != id),
            _ => {}
        }
        Vec::new()
    }
}

// =============================================================================
// Table
// =============================================================================

/// A table and the customers currently seated at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    id: TableId,
    customers: Vec<Customer>,
}

impl Table {
    pub fn new(id: TableId) -> Self {
        Table {
            id,
            customers: Vec::new(),
        }
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Seats `count` more customers, numbered after those already seated.
    pub fn seat(&mut self, count: u32) -> CoreResult<SeatingEvent> {
        validate_party_size(count)?;

        let first = self.customers.len() as u32 + 1;
        self.customers
            .extend((first..first + count).map(Customer::new));

        Ok(SeatingEvent {
            table_id: self.id,
            count,
        })
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, customer_id: u32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id() == customer_id)
    }

    pub fn customer_mut(&mut self, customer_id: u32) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id() == customer_id)
    }

    /// Undelivered orders across every customer.
    pub fn open_orders(&self) -> usize {
        self.customers.iter().map(|c| c.pending().len()).sum()
    }

    /// Every order of every customer, pending first per customer.
    pub fn orders(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.customers.iter().flat_map(Customer::orders)
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Unseats everyone.
    pub fn clear(&mut self) -> Vec<Customer> {
        std::mem::take(&mut self.customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::menu::MenuItem;
    use crate::money::Money;

    fn order(id: u32) -> Order {
        let item = MenuItem::new("soup", Money::from_cents(500)).unwrap();
        Order::new(OrderId::new(id), &item)
    }

    #[test]
    fn test_seat_numbers_customers() {
        let mut table = Table::new(TableId::new(4));
        let event = table.seat(2).unwrap();
        assert_eq!(event.count, 2);
        table.seat(1).unwrap();

        let ids: Vec<u32> = table.customers().iter().map(Customer::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_seat_rejects_empty_party() {
        let mut table = Table::new(TableId::new(1));
        assert!(matches!(table.seat(0), Err(CoreError::Validation(_))));
        assert!(table.is_empty());
    }

    #[test]
    fn test_customer_lists_follow_state() {
        let mut customer = Customer::new(1);
        let a = order(1);
        let b = order(2);

        customer.on_order_state_changed(&a, OrderState::Placed);
        customer.on_order_state_changed(&b, OrderState::Placed);
        customer.on_order_state_changed(&a, OrderState::Preparing);
        assert_eq!(customer.pending(), &[OrderId::new(1), OrderId::new(2)]);

        customer.on_order_state_changed(&a, OrderState::Delivered);
        customer.on_order_state_changed(&b, OrderState::Cancel);
        assert!(customer.pending().is_empty());
        assert_eq!(customer.confirmed(), &[OrderId::new(1)]);

        // Repeat notifications do nothing
        customer.on_order_state_changed(&b, OrderState::Cancel);
        customer.on_order_state_changed(&a, OrderState::Delivered);
        assert_eq!(customer.confirmed(), &[OrderId::new(1)]);
    }

    #[test]
    fn test_open_orders_and_clear() {
        let mut table = Table::new(TableId::new(2));
        table.seat(2).unwrap();
        let a = order(1);
        table
            .customer_mut(2)
            .unwrap()
            .on_order_state_changed(&a, OrderState::Placed);
        assert_eq!(table.open_orders(), 1);
        assert_eq!(table.orders().collect::<Vec<_>>(), vec![OrderId::new(1)]);

        assert_eq!(table.clear().len(), 2);
        assert!(table.is_empty());
    }
}
