//! # Restaurant
//!
//! The aggregate every screen works through.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Restaurant                                    │
//! │                                                                         │
//! │  orders: BTreeMap<OrderId, Order>   ◄── every live order, by id         │
//! │     ▲           ▲            ▲                                          │
//! │     │ ids       │ ids        │ ids                                      │
//! │  ┌──┴─────┐ ┌───┴──────┐ ┌───┴────────┐ ┌────────┐ ┌──────────┐         │
//! │  │ index  │ │ tables   │ │ staff      │ │ ledger │ │ catalog  │         │
//! │  │        │ │ customers│ │ queues     │ │        │ │          │         │
//! │  └────────┘ └──────────┘ └────────────┘ └────────┘ └──────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Command Contract
//! Every command validates first and mutates second. A command that returns
//! `Err` has changed nothing. A command that succeeds returns the
//! [`Effect`]s it caused; the caller applies them with an
//! [`EffectSink`](crate::effect::EffectSink).
//!
//! ## Example
//! ```rust
//! use restman_core::prelude::*;
//!
//! let mut r = Restaurant::new();
//! let server = r.hire(EmployeeRole::Server, "alice").unwrap();
//! let table = r.open_table();
//! r.seat_customers(table, 1).unwrap();
//! r.add_menu_item(MenuItem::new("water", Money::zero()).unwrap()).unwrap();
//!
//! let order = r.new_order("water").unwrap();
//! let id = order.id();
//! r.place_order(server, table, 1, order).unwrap();
//! assert_eq!(r.pending_orders()[0].id(), id);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::billing::{CustomerBill, TableBill};
use crate::bus::{Notification, OrderObserver, Subscriber};
use crate::customer::{CustomerRef, Table, TableId};
use crate::effect::{AuditEvent, Effect, OrderEvent};
use crate::error::{CoreError, CoreResult};
use crate::index::OrderIndex;
use crate::ingredient::{Ingredient, IngredientLedger};
use crate::menu::{Catalog, MenuItem};
use crate::money::Money;
use crate::order::{Order, OrderId, OrderState};
use crate::quantity::Quantity;
use crate::staff::{Employee, EmployeeId, EmployeeRole, Staff};
use crate::validation::{validate_price, validate_quantity};

/// Name of the manager account every new restaurant starts with.
pub const DEFAULT_MANAGER: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    ledger: IngredientLedger,
    catalog: Catalog,
    staff: Staff,
    tables: BTreeMap<TableId, Table>,
    last_table_id: u32,
    orders: BTreeMap<OrderId, Order>,
    index: OrderIndex,
    last_order_id: u32,
}

impl Default for Restaurant {
    fn default() -> Self {
        Self::new()
    }
}

impl Restaurant {
    /// Empty restaurant with a single manager account.
    pub fn new() -> Self {
        Restaurant {
            ledger: IngredientLedger::new(),
            catalog: Catalog::new(),
            staff: Staff::with_manager(DEFAULT_MANAGER),
            tables: BTreeMap::new(),
            last_table_id: 0,
            orders: BTreeMap::new(),
            index: OrderIndex::new(),
            last_order_id: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn ledger(&self) -> &IngredientLedger {
        &self.ledger
    }

    /// Direct ledger access, for registering ingredients while building menus.
    pub fn ledger_mut(&mut self) -> &mut IngredientLedger {
        &mut self.ledger
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn staff(&self) -> &Staff {
        &self.staff
    }

    pub fn order(&self, order_id: OrderId) -> CoreResult<&Order> {
        self.orders
            .get(&order_id)
            .ok_or(CoreError::OrderNotFound(order_id))
    }

    /// Every live order (placed and not yet billed or cancelled).
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn order_index(&self) -> &OrderIndex {
        &self.index
    }

    /// Orders waiting for a cook.
    pub fn pending_orders(&self) -> Vec<&Order> {
        self.index.pending(&self.orders)
    }

    /// Orders sent back and waiting to be redone.
    pub fn remake_orders(&self) -> Vec<&Order> {
        self.index.remake(&self.orders)
    }

    /// Orders in an employee's queue: ready for a server, in progress for a cook.
    pub fn queue_of(&self, employee_id: EmployeeId) -> CoreResult<Vec<&Order>> {
        let employee = self.staff.get(employee_id)?;
        Ok(employee
            .queue()
            .iter()
            .filter_map(|id| self.orders.get(id))
            .collect())
    }

    pub fn table(&self, table_id: TableId) -> CoreResult<&Table> {
        self.tables
            .get(&table_id)
            .ok_or(CoreError::TableNotFound(table_id))
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Menu items the current stock can make.
    pub fn available_menu(&self) -> Vec<&MenuItem> {
        self.catalog.available(&self.ledger).collect()
    }

    // =========================================================================
    // Staff
    // =========================================================================

    pub fn hire(&mut self, role: EmployeeRole, name: &str) -> CoreResult<EmployeeId> {
        self.staff.hire(role, name)
    }

    /// Removes an employee. Their subscriptions on live orders go quiet.
    pub fn fire(&mut self, employee_id: EmployeeId) -> CoreResult<Employee> {
        self.staff.fire(employee_id)
    }

    pub fn rename_employee(&mut self, employee_id: EmployeeId, name: &str) -> CoreResult<()> {
        self.staff.rename(employee_id, name)
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub fn add_menu_item(&mut self, item: MenuItem) -> CoreResult<()> {
        self.catalog.add(item)
    }

    pub fn remove_menu_item(&mut self, name: &str) -> CoreResult<MenuItem> {
        self.catalog.remove(name)
    }

    pub fn set_menu_price(&mut self, name: &str, price: Money) -> CoreResult<()> {
        self.catalog.get_mut(name)?.set_price(price)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Registers an ingredient (or replaces its cost and threshold) and
    /// refreshes recipe costs.
    pub fn register_ingredient(&mut self, ingredient: Ingredient) -> CoreResult<()> {
        validate_price("unit cost", ingredient.unit_cost())?;
        validate_quantity("threshold", ingredient.threshold())?;
        let registered = self.ledger.register(ingredient);
        self.catalog.refresh_costs(registered);
        Ok(())
    }

    /// Adds a delivery to stock.
    pub fn receive_stock(&mut self, name: &str, quantity: Quantity) -> CoreResult<Vec<Effect>> {
        validate_quantity("received quantity", quantity)?;
        let change = self.ledger.add(name, quantity)?;
        Ok(ingredient_effects(change))
    }

    /// Overwrites the stock level after a physical count.
    pub fn set_stock(&mut self, name: &str, quantity: Quantity) -> CoreResult<Vec<Effect>> {
        let change = self.ledger.set_quantity(name, quantity)?;
        Ok(ingredient_effects(change))
    }

    /// Changes an ingredient's unit cost. Menu recipes pick up the new cost;
    /// orders already taken keep theirs.
    pub fn set_ingredient_cost(&mut self, name: &str, unit_cost: Money) -> CoreResult<()> {
        validate_price("unit cost", unit_cost)?;
        let ingredient = self.ledger.ingredient_mut(name);
        ingredient.set_unit_cost(unit_cost);
        self.catalog.refresh_costs(ingredient);
        Ok(())
    }

    pub fn set_ingredient_threshold(&mut self, name: &str, threshold: Quantity) -> CoreResult<()> {
        validate_quantity("threshold", threshold)?;
        self.ledger.ingredient_mut(name).set_threshold(threshold);
        Ok(())
    }

    pub fn remove_ingredient(&mut self, name: &str) -> Option<Ingredient> {
        self.ledger.remove(name)
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Opens a new table and returns its number.
    pub fn open_table(&mut self) -> TableId {
        self.last_table_id += 1;
        let id = TableId::new(self.last_table_id);
        self.tables.insert(id, Table::new(id));
        id
    }

    /// Closes a table. Refused while any of its orders is undelivered.
    pub fn close_table(&mut self, table_id: TableId) -> CoreResult<Table> {
        let open = self.table(table_id)?.open_orders();
        if open > 0 {
            return Err(CoreError::TableHasOpenOrders { table_id, open });
        }
        let mut table = self
            .tables
            .remove(&table_id)
            .ok_or(CoreError::TableNotFound(table_id))?;
        self.retire_orders(&table);
        table.clear();
        Ok(table)
    }

    pub fn seat_customers(&mut self, table_id: TableId, count: u32) -> CoreResult<Vec<Effect>> {
        let table = self
            .tables
            .get_mut(&table_id)
            .ok_or(CoreError::TableNotFound(table_id))?;
        let event = table.seat(count)?;
        Ok(vec![Effect::Audit(AuditEvent::Seating(event))])
    }

    // =========================================================================
    // Order Life Cycle
    // =========================================================================

    /// Starts an order for a catalog item. Nobody sees it until it is placed.
    pub fn new_order(&mut self, item_name: &str) -> CoreResult<Order> {
        let template = self
            .catalog
            .get(item_name)
            .ok_or_else(|| CoreError::MenuItemNotFound(item_name.trim().to_lowercase()))?;
        self.last_order_id += 1;
        let mut order = Order::new(OrderId::new(self.last_order_id), template);
        order.refresh_costs(&self.ledger);
        Ok(order)
    }

    /// Sends a constructed order to the kitchen on behalf of a customer.
    ///
    /// ## Flow
    /// ```text
    /// check server, table, customer, state, stock
    ///      │ (any failure: nothing changes)
    ///      ▼
    /// subscribe Server → Customer → OrderIndex → Inventory
    ///      ▼
    /// PLACED: customer pending, index registered, stock deducted
    /// ```
    pub fn place_order(
        &mut self,
        server_id: EmployeeId,
        table_id: TableId,
        customer_id: u32,
        mut order: Order,
    ) -> CoreResult<Vec<Effect>> {
        self.staff.with_role(server_id, EmployeeRole::Server)?;
        self.table(table_id)?
            .customer(customer_id)
            .ok_or(CoreError::CustomerNotFound {
                table_id,
                customer_id,
            })?;
        if !order.state().can_transition_to(OrderState::Placed) {
            return Err(CoreError::InvalidTransition {
                order_id: order.id(),
                from: order.state(),
                to: OrderState::Placed,
            });
        }
        self.ledger.check_feasible(&order)?;
        order.refresh_costs(&self.ledger);

        let order_id = order.id();
        order.add_observer(Subscriber::Server {
            employee_id: server_id,
        });
        order.add_observer(Subscriber::Customer {
            customer: CustomerRef {
                table_id,
                customer_id,
            },
        });
        order.add_observer(Subscriber::OrderIndex);
        order.add_observer(Subscriber::Inventory);
        self.orders.insert(order_id, order);

        self.transition(order_id, OrderState::Placed, server_id)
    }

    /// A cook picks up a pending or remade order.
    pub fn order_seen(&mut self, cook_id: EmployeeId, order_id: OrderId) -> CoreResult<Vec<Effect>> {
        self.staff.with_role(cook_id, EmployeeRole::Cook)?;
        self.check_transition(order_id, OrderState::Preparing)?;

        if let Some(kitchen) = self.staff.get_mut(cook_id).and_then(Employee::kitchen_mut) {
            kitchen.claim(order_id);
        }
        if let Some(order) = self.orders.get_mut(&order_id) {
            order.add_observer(Subscriber::Cook {
                employee_id: cook_id,
            });
        }

        self.transition(order_id, OrderState::Preparing, cook_id)
    }

    /// The cook who is preparing an order marks it ready.
    pub fn order_ready(&mut self, cook_id: EmployeeId, order_id: OrderId) -> CoreResult<Vec<Effect>> {
        let cook = self.staff.with_role(cook_id, EmployeeRole::Cook)?;
        self.check_transition(order_id, OrderState::Ready)?;
        if !cook.queue().contains(&order_id) {
            return Err(CoreError::OrderNotClaimed {
                order_id,
                employee_id: cook_id,
            });
        }

        if let Some(kitchen) = self.staff.get_mut(cook_id).and_then(Employee::kitchen_mut) {
            kitchen.finish(order_id);
        }

        self.transition(order_id, OrderState::Ready, cook_id)
    }

    /// The customer accepts the food.
    pub fn confirm_order(&mut self, server_id: EmployeeId, order_id: OrderId) -> CoreResult<Vec<Effect>> {
        self.staff.with_role(server_id, EmployeeRole::Server)?;
        self.check_transition(order_id, OrderState::Delivered)?;
        self.transition(order_id, OrderState::Delivered, server_id)
    }

    /// The customer sends the food back. The reason is kept as a note.
    pub fn reject_order(
        &mut self,
        server_id: EmployeeId,
        order_id: OrderId,
        reason: &str,
    ) -> CoreResult<Vec<Effect>> {
        self.staff.with_role(server_id, EmployeeRole::Server)?;
        self.check_transition(order_id, OrderState::Remake)?;

        if let Some(order) = self.orders.get_mut(&order_id) {
            order.add_note(reason);
        }

        self.transition(order_id, OrderState::Remake, server_id)
    }

    /// Cancels a live order. Any employee may cancel.
    ///
    /// Every collaborator drops the order, then the order itself is destroyed.
    /// Stock already deducted is not returned. Orders that were never placed
    /// are not known here; see [`discard_order`](Self::discard_order).
    pub fn cancel_order(&mut self, employee_id: EmployeeId, order_id: OrderId) -> CoreResult<Vec<Effect>> {
        self.staff.get(employee_id)?;
        self.check_transition(order_id, OrderState::Cancel)?;

        let effects = self.transition(order_id, OrderState::Cancel, employee_id)?;
        self.orders.remove(&order_id);
        Ok(effects)
    }

    /// Cancels an order that may never have been placed.
    ///
    /// An order still being built lives only in the caller's hands, so it is
    /// cancelled in place and audited. A placed order goes through
    /// [`cancel_order`](Self::cancel_order).
    pub fn discard_order(&mut self, employee_id: EmployeeId, mut order: Order) -> CoreResult<Vec<Effect>> {
        if order.state() != OrderState::Constructing {
            return self.cancel_order(employee_id, order.id());
        }

        let actor = self.staff.get(employee_id)?.to_string();
        order.set_state(OrderState::Cancel);
        Ok(vec![Effect::Audit(AuditEvent::Order(OrderEvent::new(
            &order, actor,
        )))])
    }

    fn check_transition(&self, order_id: OrderId, to: OrderState) -> CoreResult<()> {
        let from = self.order(order_id)?.state();
        if !from.can_transition_to(to) {
            return Err(CoreError::InvalidTransition { order_id, from, to });
        }
        Ok(())
    }

    /// Applies a checked transition, notifies subscribers, and audits it.
    fn transition(
        &mut self,
        order_id: OrderId,
        to: OrderState,
        actor: EmployeeId,
    ) -> CoreResult<Vec<Effect>> {
        let actor = self.staff.get(actor)?.to_string();
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(CoreError::OrderNotFound(order_id))?;

        let notification = order.set_state(to);
        let mut effects = self.publish(&notification);

        if let Some(order) = self.orders.get(&order_id) {
            effects.push(Effect::Audit(AuditEvent::Order(OrderEvent::new(order, actor))));
        }
        Ok(effects)
    }

    /// Delivers a notification to each subscriber in subscription order.
    fn publish(&mut self, notification: &Notification) -> Vec<Effect> {
        let Restaurant {
            ledger,
            staff,
            tables,
            orders,
            index,
            ..
        } = self;

        let Some(order) = orders.get(&notification.order_id) else {
            return Vec::new();
        };
        let state = notification.state;

        let mut effects = Vec::new();
        for subscriber in &notification.subscribers {
            let produced = match subscriber {
                Subscriber::Server { employee_id } | Subscriber::Cook { employee_id } => staff
                    .get_mut(*employee_id)
                    .map(|e| e.on_order_state_changed(order, state))
                    .unwrap_or_default(),
                Subscriber::Customer { customer } => tables
                    .get_mut(&customer.table_id)
                    .and_then(|t| t.customer_mut(customer.customer_id))
                    .map(|c| c.on_order_state_changed(order, state))
                    .unwrap_or_default(),
                Subscriber::OrderIndex => index.on_order_state_changed(order, state),
                Subscriber::Inventory => ledger.on_order_state_changed(order, state),
            };
            effects.extend(produced);
        }
        effects
    }

    // =========================================================================
    // Billing
    // =========================================================================

    /// One customer's running bill. Changes nothing.
    pub fn bill_customer(&self, table_id: TableId, customer_id: u32) -> CoreResult<CustomerBill> {
        let customer = self
            .table(table_id)?
            .customer(customer_id)
            .ok_or(CoreError::CustomerNotFound {
                table_id,
                customer_id,
            })?;
        Ok(CustomerBill::for_customer(customer, &self.orders))
    }

    /// Bills the whole table, then unseats everyone and retires their orders.
    ///
    /// Refused while any order at the table is undelivered. Billing an empty
    /// table yields a zero bill.
    pub fn bill_table(&mut self, table_id: TableId) -> CoreResult<TableBill> {
        let table = self.table(table_id)?;
        let open = table.open_orders();
        if open > 0 {
            return Err(CoreError::TableHasOpenOrders { table_id, open });
        }

        let bill = TableBill::for_table(table, &self.orders);
        if let Some(mut table) = self.tables.remove(&table_id) {
            self.retire_orders(&table);
            table.clear();
            self.tables.insert(table_id, table);
        }
        Ok(bill)
    }

    fn retire_orders(&mut self, table: &Table) {
        for order_id in table.orders() {
            self.orders.remove(&order_id);
            self.index.retire(order_id);
        }
    }
}

/// Audit effect for a stock change, unless the level did not move.
fn ingredient_effects(change: crate::ingredient::QuantityChange) -> Vec<Effect> {
    if change.is_noop() {
        Vec::new()
    } else {
        vec![Effect::Audit(AuditEvent::Ingredient(change))]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuIngredient;

    struct Floor {
        r: Restaurant,
        server: EmployeeId,
        cook: EmployeeId,
        table: TableId,
    }

    fn floor() -> Floor {
        let mut r = Restaurant::new();
        let server = r.hire(EmployeeRole::Server, "alice").unwrap();
        let cook = r.hire(EmployeeRole::Cook, "bob").unwrap();
        let table = r.open_table();
        r.seat_customers(table, 2).unwrap();

        let fries = r.ledger_mut().ingredient("potato").clone();
        r.add_menu_item(
            MenuItem::new("fries", Money::from_cents(500))
                .unwrap()
                .with_ingredient(MenuIngredient::fixed(&fries, Quantity::from_units(1)).unwrap()),
        )
        .unwrap();
        r.receive_stock("potato", Quantity::from_units(50)).unwrap();

        Floor {
            r,
            server,
            cook,
            table,
        }
    }

    fn placed(f: &mut Floor) -> OrderId {
        let order = f.r.new_order("fries").unwrap();
        let id = order.id();
        f.r.place_order(f.server, f.table, 1, order).unwrap();
        id
    }

    #[test]
    fn test_new_restaurant_has_admin() {
        let r = Restaurant::new();
        let admin = r.staff().by_role(EmployeeRole::Manager).next().unwrap();
        assert_eq!(admin.name(), DEFAULT_MANAGER);
    }

    #[test]
    fn test_place_order_checks_role() {
        let mut f = floor();
        let order = f.r.new_order("fries").unwrap();
        let err = f.r.place_order(f.cook, f.table, 1, order).unwrap_err();
        assert!(matches!(err, CoreError::WrongRole { .. }));
        assert_eq!(f.r.ledger().stock_of("potato"), Quantity::from_units(50));
    }

    #[test]
    fn test_place_order_unknown_customer() {
        let mut f = floor();
        let order = f.r.new_order("fries").unwrap();
        let err = f.r.place_order(f.server, f.table, 9, order).unwrap_err();
        assert!(matches!(err, CoreError::CustomerNotFound { customer_id: 9, .. }));
        assert!(f.r.pending_orders().is_empty());
    }

    #[test]
    fn test_full_cycle_moves_through_queues() {
        let mut f = floor();
        let id = placed(&mut f);
        assert_eq!(f.r.pending_orders().len(), 1);

        f.r.order_seen(f.cook, id).unwrap();
        assert!(f.r.pending_orders().is_empty());
        assert_eq!(f.r.queue_of(f.cook).unwrap()[0].id(), id);

        f.r.order_ready(f.cook, id).unwrap();
        assert!(f.r.queue_of(f.cook).unwrap().is_empty());
        assert_eq!(f.r.queue_of(f.server).unwrap()[0].id(), id);

        let effects = f.r.confirm_order(f.server, id).unwrap();
        assert!(f.r.queue_of(f.server).unwrap().is_empty());
        assert_eq!(f.r.order(id).unwrap().state(), OrderState::Delivered);

        let table = f.r.table(f.table).unwrap();
        assert_eq!(table.customer(1).unwrap().confirmed(), &[id]);
        match effects.last() {
            Some(Effect::Audit(AuditEvent::Order(event))) => {
                assert_eq!(event.state, OrderState::Delivered);
                assert_eq!(event.employee, "server: alice (#2)");
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn test_only_claiming_cook_can_finish() {
        let mut f = floor();
        let other = f.r.hire(EmployeeRole::Cook, "carol").unwrap();
        let id = placed(&mut f);
        f.r.order_seen(f.cook, id).unwrap();

        let err = f.r.order_ready(other, id).unwrap_err();
        assert!(matches!(err, CoreError::OrderNotClaimed { .. }));
        assert_eq!(f.r.order(id).unwrap().state(), OrderState::Preparing);
    }

    #[test]
    fn test_reject_sends_to_remake_with_note() {
        let mut f = floor();
        let id = placed(&mut f);
        f.r.order_seen(f.cook, id).unwrap();
        f.r.order_ready(f.cook, id).unwrap();

        f.r.reject_order(f.server, id, "cold").unwrap();
        assert_eq!(f.r.remake_orders()[0].id(), id);
        assert_eq!(f.r.order(id).unwrap().notes(), &["cold".to_string()]);
        assert!(f.r.queue_of(f.server).unwrap().is_empty());

        f.r.order_seen(f.cook, id).unwrap();
        assert!(f.r.remake_orders().is_empty());
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut f = floor();
        let id = placed(&mut f);
        f.r.order_seen(f.cook, id).unwrap();
        f.r.order_ready(f.cook, id).unwrap();
        f.r.confirm_order(f.server, id).unwrap();

        let err = f.r.cancel_order(f.server, id).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                order_id: id,
                from: OrderState::Delivered,
                to: OrderState::Cancel,
            }
        );
    }

    #[test]
    fn test_cancel_destroys_order() {
        let mut f = floor();
        let id = placed(&mut f);
        f.r.order_seen(f.cook, id).unwrap();

        f.r.cancel_order(f.server, id).unwrap();
        assert!(f.r.order(id).is_err());
        assert!(!f.r.order_index().contains(id));
        assert!(f.r.queue_of(f.cook).unwrap().is_empty());
        let customer = f.r.table(f.table).unwrap().customer(1).unwrap();
        assert!(customer.pending().is_empty());

        // Stock is not returned
        assert_eq!(f.r.ledger().stock_of("potato"), Quantity::from_units(49));
    }

    #[test]
    fn test_discard_unplaced_order() {
        let mut f = floor();
        let order = f.r.new_order("fries").unwrap();
        let id = order.id();

        let effects = f.r.discard_order(f.server, order).unwrap();
        match effects.as_slice() {
            [Effect::Audit(AuditEvent::Order(event))] => {
                assert_eq!(event.state, OrderState::Cancel);
                assert_eq!(event.order_id, id);
            }
            other => panic!("unexpected effects {other:?}"),
        }
        assert!(f.r.order(id).is_err());
        assert!(f.r.pending_orders().is_empty());
        assert_eq!(f.r.ledger().stock_of("potato"), Quantity::from_units(50));
    }

    #[test]
    fn test_discard_placed_order_cancels_it() {
        let mut f = floor();
        let id = placed(&mut f);
        let copy = f.r.order(id).unwrap().clone();

        f.r.discard_order(f.server, copy).unwrap();
        assert!(f.r.order(id).is_err());
        assert!(!f.r.order_index().contains(id));
    }

    #[test]
    fn test_receive_stock_refuses_overflow() {
        let mut f = floor();
        let huge = Quantity::from_hundredths(i64::MAX - 10);
        let err = f.r.receive_stock("potato", huge).unwrap_err();
        assert!(matches!(err, CoreError::StockOverflow { .. }));
        assert_eq!(f.r.ledger().stock_of("potato"), Quantity::from_units(50));

        f.r.receive_stock("cheese", huge).unwrap();
        assert!(f.r.receive_stock("cheese", huge).is_err());
        assert_eq!(f.r.ledger().stock_of("cheese"), huge);
    }

    #[test]
    fn test_bill_table_refuses_open_orders() {
        let mut f = floor();
        placed(&mut f);
        let err = f.r.bill_table(f.table).unwrap_err();
        assert_eq!(
            err,
            CoreError::TableHasOpenOrders {
                table_id: f.table,
                open: 1,
            }
        );
    }

    #[test]
    fn test_close_table() {
        let mut f = floor();
        let id = placed(&mut f);
        assert!(f.r.close_table(f.table).is_err());

        f.r.cancel_order(f.server, id).unwrap();
        f.r.close_table(f.table).unwrap();
        assert!(f.r.table(f.table).is_err());
    }

    #[test]
    fn test_set_ingredient_cost_refreshes_menu() {
        let mut f = floor();
        f.r.set_ingredient_cost("potato", Money::from_cents(20)).unwrap();
        let line = f.r.catalog().get("fries").unwrap().ingredient("potato").unwrap();
        assert_eq!(line.unit_cost().cents(), 20);
        assert!(f.r.set_ingredient_cost("potato", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_order_price_follows_ledger_cost() {
        let mut f = floor();
        let cheese = f.r.ledger_mut().ingredient("cheese").clone();
        f.r.add_menu_item(
            MenuItem::new("nachos", Money::from_cents(1000))
                .unwrap()
                .with_ingredient(
                    MenuIngredient::new(
                        &cheese,
                        Quantity::zero(),
                        Quantity::from_units(1),
                        Quantity::from_units(3),
                    )
                    .unwrap(),
                ),
        )
        .unwrap();
        f.r.receive_stock("cheese", Quantity::from_units(10)).unwrap();

        // Cost changed behind the catalog's back
        f.r.ledger_mut()
            .ingredient_mut("cheese")
            .set_unit_cost(Money::from_cents(50));

        let mut order = f.r.new_order("nachos").unwrap();
        order
            .set_ingredient_quantity("cheese", Quantity::from_units(3))
            .unwrap();
        assert_eq!(order.price().cents(), 1100);

        f.r.ledger_mut()
            .ingredient_mut("cheese")
            .set_unit_cost(Money::from_cents(75));
        let id = order.id();
        f.r.place_order(f.server, f.table, 1, order).unwrap();
        assert_eq!(f.r.order(id).unwrap().price().cents(), 1150);

        // Placed orders keep their quote
        f.r.set_ingredient_cost("cheese", Money::from_cents(90)).unwrap();
        assert_eq!(f.r.order(id).unwrap().price().cents(), 1150);
    }

    #[test]
    fn test_set_stock_noop_is_silent() {
        let mut f = floor();
        let effects = f.r.set_stock("potato", Quantity::from_units(50)).unwrap();
        assert!(effects.is_empty());
        let effects = f.r.set_stock("potato", Quantity::from_units(40)).unwrap();
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_fired_server_is_skipped() {
        let mut f = floor();
        let id = placed(&mut f);
        let replacement = f.r.hire(EmployeeRole::Server, "dave").unwrap();
        f.r.fire(f.server).unwrap();

        f.r.order_seen(f.cook, id).unwrap();
        f.r.order_ready(f.cook, id).unwrap();
        f.r.confirm_order(replacement, id).unwrap();
        assert_eq!(f.r.order(id).unwrap().state(), OrderState::Delivered);
    }
}
