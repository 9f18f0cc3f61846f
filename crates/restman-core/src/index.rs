//! Restaurant-wide registry of live orders.
//!
//! An order is registered when it is placed and deregistered when it is
//! cancelled. The index only holds ids; the orders themselves live in the
//! [`Restaurant`](crate::restaurant::Restaurant).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::bus::OrderObserver;
use crate::effect::Effect;
use crate::order::{Order, OrderId, OrderState};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderIndex {
    registered: BTreeSet<OrderId>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.registered.contains(&order_id)
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.registered.iter().copied()
    }

    /// Drops an order without a state change (after billing).
    pub fn retire(&mut self, order_id: OrderId) -> bool {
        self.registered.remove(&order_id)
    }

    fn in_state<'a>(
        &'a self,
        orders: &'a BTreeMap<OrderId, Order>,
        state: OrderState,
    ) -> Vec<&'a Order> {
        self.registered
            .iter()
            .filter_map(|id| orders.get(id))
            .filter(|o| o.state() == state)
            .collect()
    }

    /// Orders waiting for a cook, oldest first.
    pub fn pending<'a>(&'a self, orders: &'a BTreeMap<OrderId, Order>) -> Vec<&'a Order> {
        self.in_state(orders, OrderState::Placed)
    }

    /// Orders sent back by customers, oldest first.
    pub fn remake<'a>(&'a self, orders: &'a BTreeMap<OrderId, Order>) -> Vec<&'a Order> {
        self.in_state(orders, OrderState::Remake)
    }
}

impl OrderObserver for OrderIndex {
    fn on_order_state_changed(&mut self, order: &Order, state: OrderState) -> Vec<Effect> {
        match state {
            OrderState::Placed => {
                self.registered.insert(order.id());
            }
            OrderState::Cancel => {
                self.registered.remove(&order.id());
            }
            _ => {}
        }
        Vec::new()
    }
}
