//! # Staff
//!
//! Employees and their work queues.
//!
//! ## Roles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Server   places orders, confirms or rejects delivered food             │
//! │           PickupQueue: orders READY for this server to carry out        │
//! │                                                                         │
//! │  Cook     picks orders from the pending/remake pools                    │
//! │           KitchenQueue: orders this cook is preparing                   │
//! │                                                                         │
//! │  Manager  stock, menu, seating and billing                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Employee ids are handed out in sequence and never reused, so a stale
//! subscription on an old order cannot reach a newly hired employee.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::bus::OrderObserver;
use crate::effect::Effect;
use crate::error::{CoreError, CoreResult};
use crate::order::{Order, OrderId, OrderState};
use crate::validation::validate_name;

// =============================================================================
// Identity
// =============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct EmployeeId(u32);

impl EmployeeId {
    pub const fn new(id: u32) -> Self {
        EmployeeId(id)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum EmployeeRole {
    Server,
    Cook,
    Manager,
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeRole::Server => write!(f, "server"),
            EmployeeRole::Cook => write!(f, "cook"),
            EmployeeRole::Manager => write!(f, "manager"),
        }
    }
}

// =============================================================================
// Queues
// =============================================================================

/// Orders waiting at the pass for one server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupQueue {
    orders: Vec<OrderId>,
}

impl PickupQueue {
    pub fn orders(&self) -> &[OrderId] {
        &self.orders
    }
}

impl OrderObserver for PickupQueue {
    fn on_order_state_changed(&mut self, order: &Order, state: OrderState) -> Vec<Effect> {
        let id = order.id();
        if state == OrderState::Ready {
            if !self.orders.contains(&id) {
                self.orders.push(id);
            }
        } else {
            self.orders.retain(|o| *o != id);
        }
        Vec::new()
    }
}

/// Orders one cook is preparing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenQueue {
    orders: Vec<OrderId>,
}

impl KitchenQueue {
    pub fn orders(&self) -> &[OrderId] {
        &self.orders
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.orders.contains(&order_id)
    }

    pub fn claim(&mut self, order_id: OrderId) {
        if !self.contains(order_id) {
            self.orders.push(order_id);
        }
    }

    /// Removes a finished order. Returns false if this cook never had it.
    pub fn finish(&mut self, order_id: OrderId) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| *o != order_id);
        self.orders.len() != before
    }
}

impl OrderObserver for KitchenQueue {
    fn on_order_state_changed(&mut self, order: &Order, state: OrderState) -> Vec<Effect> {
        if state == OrderState::Cancel {
            self.orders.retain(|o| *o != order.id());
        }
        Vec::new()
    }
}

// =============================================================================
// Employee
// =============================================================================

/// What an employee does, with the queue that role keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Duty {
    Server { pickup: PickupQueue },
    Cook { kitchen: KitchenQueue },
    Manager,
}

impl Duty {
    fn for_role(role: EmployeeRole) -> Self {
        match role {
            EmployeeRole::Server => Duty::Server {
                pickup: PickupQueue::default(),
            },
            EmployeeRole::Cook => Duty::Cook {
                kitchen: KitchenQueue::default(),
            },
            EmployeeRole::Manager => Duty::Manager,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    duty: Duty,
}

impl Employee {
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> EmployeeRole {
        match self.duty {
            Duty::Server { .. } => EmployeeRole::Server,
            Duty::Cook { .. } => EmployeeRole::Cook,
            Duty::Manager => EmployeeRole::Manager,
        }
    }

    pub fn duty(&self) -> &Duty {
        &self.duty
    }

    /// Fails with `WrongRole` unless this employee has `expected`.
    pub fn require_role(&self, expected: EmployeeRole) -> CoreResult<()> {
        let actual = self.role();
        if actual != expected {
            return Err(CoreError::WrongRole {
                employee_id: self.id,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Orders in this employee's queue. Managers have none.
    pub fn queue(&self) -> &[OrderId] {
        match &self.duty {
            Duty::Server { pickup } => pickup.orders(),
            Duty::Cook { kitchen } => kitchen.orders(),
            Duty::Manager => &[],
        }
    }

    pub fn kitchen_mut(&mut self) -> Option<&mut KitchenQueue> {
        match &mut self.duty {
            Duty::Cook { kitchen } => Some(kitchen),
            _ => None,
        }
    }
}

/// `server: alice (#2)`
impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.role(), self.name, self.id)
    }
}

impl OrderObserver for Employee {
    fn on_order_state_changed(&mut self, order: &Order, state: OrderState) -> Vec<Effect> {
        match &mut self.duty {
            Duty::Server { pickup } => pickup.on_order_state_changed(order, state),
            Duty::Cook { kitchen } => kitchen.on_order_state_changed(order, state),
            Duty::Manager => Vec::new(),
        }
    }
}

// =============================================================================
// Staff Registry
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Staff {
    employees: BTreeMap<EmployeeId, Employee>,
    last_id: u32,
}

impl Staff {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding one manager, the account a fresh restaurant starts with.
    pub(crate) fn with_manager(name: &str) -> Self {
        let mut staff = Self::new();
        staff.enroll(EmployeeRole::Manager, name.trim().to_string());
        staff
    }

    pub fn hire(&mut self, role: EmployeeRole, name: &str) -> CoreResult<EmployeeId> {
        let name = validate_name("employee name", name)?;
        Ok(self.enroll(role, name))
    }

    fn enroll(&mut self, role: EmployeeRole, name: String) -> EmployeeId {
        self.last_id += 1;
        let id = EmployeeId::new(self.last_id);
        self.employees.insert(
            id,
            Employee {
                id,
                name,
                duty: Duty::for_role(role),
            },
        );
        id
    }

    pub fn fire(&mut self, id: EmployeeId) -> CoreResult<Employee> {
        self.employees
            .remove(&id)
            .ok_or(CoreError::EmployeeNotFound(id))
    }

    pub fn rename(&mut self, id: EmployeeId, name: &str) -> CoreResult<()> {
        let name = validate_name("employee name", name)?;
        let employee = self
            .employees
            .get_mut(&id)
            .ok_or(CoreError::EmployeeNotFound(id))?;
        employee.name = name;
        Ok(())
    }

    pub fn get(&self, id: EmployeeId) -> CoreResult<&Employee> {
        self.employees.get(&id).ok_or(CoreError::EmployeeNotFound(id))
    }

    pub fn get_mut(&mut self, id: EmployeeId) -> Option<&mut Employee> {
        self.employees.get_mut(&id)
    }

    /// Looks up an employee and checks the role in one step.
    pub fn with_role(&self, id: EmployeeId, role: EmployeeRole) -> CoreResult<&Employee> {
        let employee = self.get(id)?;
        employee.require_role(role)?;
        Ok(employee)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    pub fn by_role(&self, role: EmployeeRole) -> impl Iterator<Item = &Employee> {
        self.employees.values().filter(move |e| e.role() == role)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuItem;
    use crate::money::Money;

    #[test]
    fn test_with_manager_seeds_first_id() {
        let mut staff = Staff::with_manager("admin");
        let admin = staff.get(EmployeeId::new(1)).unwrap();
        assert_eq!(admin.role(), EmployeeRole::Manager);
        assert_eq!(admin.to_string(), "manager: admin (#1)");

        let next = staff.hire(EmployeeRole::Cook, "bob").unwrap();
        assert_eq!(next, EmployeeId::new(2));
    }

    fn order(id: u32) -> Order {
        let item = MenuItem::new("salad", Money::from_cents(800)).unwrap();
        Order::new(OrderId::new(id), &item)
    }

    #[test]
    fn test_hire_assigns_sequential_ids() {
        let mut staff = Staff::new();
        let alice = staff.hire(EmployeeRole::Server, "alice").unwrap();
        let bob = staff.hire(EmployeeRole::Cook, "bob").unwrap();
        assert_eq!(alice, EmployeeId::new(1));
        assert_eq!(bob, EmployeeId::new(2));

        staff.fire(bob).unwrap();
        let carol = staff.hire(EmployeeRole::Cook, "carol").unwrap();
        assert_eq!(carol, EmployeeId::new(3));
        assert!(staff.hire(EmployeeRole::Cook, " ").is_err());
    }

    #[test]
    fn test_display_and_roles() {
        let mut staff = Staff::new();
        let id = staff.hire(EmployeeRole::Server, "alice").unwrap();
        let alice = staff.get(id).unwrap();
        assert_eq!(alice.to_string(), "server: alice (#1)");

        let err = staff.with_role(id, EmployeeRole::Cook).unwrap_err();
        assert_eq!(err.to_string(), "Employee #1 is a server, expected a cook");
        assert!(staff.get(EmployeeId::new(9)).is_err());

        staff.rename(id, "Alicia").unwrap();
        assert_eq!(staff.get(id).unwrap().to_string(), "server: Alicia (#1)");
        assert!(staff.rename(EmployeeId::new(9), "x").is_err());
    }

    #[test]
    fn test_pickup_queue_follows_ready() {
        let mut queue = PickupQueue::default();
        let a = order(1);

        queue.on_order_state_changed(&a, OrderState::Ready);
        queue.on_order_state_changed(&a, OrderState::Ready);
        assert_eq!(queue.orders(), &[OrderId::new(1)]);

        queue.on_order_state_changed(&a, OrderState::Delivered);
        assert!(queue.orders().is_empty());
    }

    #[test]
    fn test_kitchen_queue_claim_finish_cancel() {
        let mut queue = KitchenQueue::default();
        queue.claim(OrderId::new(1));
        queue.claim(OrderId::new(2));

        assert!(queue.finish(OrderId::new(1)));
        assert!(!queue.finish(OrderId::new(1)));

        queue.on_order_state_changed(&order(2), OrderState::Cancel);
        assert!(queue.orders().is_empty());
    }
}
