//! # Billing
//!
//! Statements for customers and tables.
//!
//! ## Surcharges
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal  S = Σ price of every DELIVERED order                         │
//! │  HST       S × 13%     ─┐                                               │
//! │  gratuity  S × 15%      ├── each rounded half-up at the cent            │
//! │  total     S × 128%    ─┘   (total is NOT tax + gratuity + S re-summed) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only confirmed (delivered) orders are billed. Pending orders are never on
//! a bill and cancelled orders never reach the confirmed list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::customer::{Customer, Table, TableId};
use crate::menu::Recipe;
use crate::money::{Money, Rate};
use crate::order::{Order, OrderId};

/// Harmonized sales tax.
pub const TAX_RATE: Rate = Rate::from_bps(1300);

/// Gratuity added to every bill.
pub const GRATUITY_RATE: Rate = Rate::from_bps(1500);

/// Subtotal plus tax plus gratuity, as a single rate.
pub const TOTAL_RATE: Rate = Rate::from_bps(12800);

// =============================================================================
// Statement
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Statement {
    pub subtotal: Money,
    pub tax: Money,
    pub gratuity: Money,
    pub total: Money,
}

impl Statement {
    /// Applies the fixed surcharge schedule to a subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use restman_core::billing::Statement;
    /// use restman_core::money::Money;
    ///
    /// let s = Statement::from_subtotal(Money::from_cents(1500));
    /// assert_eq!(s.tax.cents(), 195);
    /// assert_eq!(s.gratuity.cents(), 225);
    /// assert_eq!(s.total.cents(), 1920);
    /// ```
    pub fn from_subtotal(subtotal: Money) -> Self {
        Statement {
            subtotal,
            tax: subtotal.apply_rate(TAX_RATE),
            gratuity: subtotal.apply_rate(GRATUITY_RATE),
            total: subtotal.apply_rate(TOTAL_RATE),
        }
    }

    fn write_lines(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        writeln!(f, "{indent}{:<32}{:>10}", "Subtotal", self.subtotal.to_string())?;
        writeln!(
            f,
            "{indent}{:<32}{:>10}",
            format!("HST ({}%)", TAX_RATE.percentage()),
            self.tax.to_string()
        )?;
        writeln!(
            f,
            "{indent}{:<32}{:>10}",
            format!("Gratuity ({}%)", GRATUITY_RATE.percentage()),
            self.gratuity.to_string()
        )?;
        writeln!(f, "{indent}{:<32}{:>10}", "Total", self.total.to_string())
    }
}

// =============================================================================
// Bill Lines
// =============================================================================

/// Charge for an ingredient above its default quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtraLine {
    pub ingredient: String,
    pub cost: Money,
}

/// One delivered order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillLine {
    pub order_id: OrderId,
    pub item: String,
    pub item_price: Money,
    pub extras: Vec<ExtraLine>,
    /// Item price plus extras.
    pub price: Money,
}

impl BillLine {
    fn from_order(order: &Order) -> Self {
        let extras = order
            .item()
            .ingredients()
            .iter()
            .filter(|i| !i.extra_cost().is_zero())
            .map(|i| ExtraLine {
                ingredient: i.name().to_string(),
                cost: i.extra_cost(),
            })
            .collect();

        BillLine {
            order_id: order.id(),
            item: order.name().to_string(),
            item_price: order.item().price(),
            extras,
            price: order.price(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerBill {
    pub customer_id: u32,
    pub lines: Vec<BillLine>,
    pub statement: Statement,
}

impl CustomerBill {
    /// Bills a customer's confirmed orders. Ids missing from `orders` are skipped.
    pub fn for_customer(customer: &Customer, orders: &BTreeMap<OrderId, Order>) -> Self {
        let lines: Vec<BillLine> = customer
            .confirmed()
            .iter()
            .filter_map(|id| orders.get(id))
            .map(BillLine::from_order)
            .collect();
        let subtotal = lines.iter().map(|l| l.price).sum();

        CustomerBill {
            customer_id: customer.id(),
            lines,
            statement: Statement::from_subtotal(subtotal),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableBill {
    pub table_id: TableId,
    /// Customers with at least one delivered order.
    pub customers: Vec<CustomerBill>,
    pub statement: Statement,
}

impl TableBill {
    /// Table subtotal is the sum of the customer subtotals.
    pub fn for_table(table: &Table, orders: &BTreeMap<OrderId, Order>) -> Self {
        let customers: Vec<CustomerBill> = table
            .customers()
            .iter()
            .map(|c| CustomerBill::for_customer(c, orders))
            .filter(|b| !b.lines.is_empty())
            .collect();
        let subtotal = customers.iter().map(|b| b.statement.subtotal).sum();

        TableBill {
            table_id: table.id(),
            customers,
            statement: Statement::from_subtotal(subtotal),
        }
    }
}

/// Printed receipt.
impl fmt::Display for TableBill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(20);
        writeln!(f, "Bill for table #{}", self.table_id)?;

        for customer in &self.customers {
            writeln!(f, "    {rule}")?;
            writeln!(f, "    Customer #{}", customer.customer_id)?;
            writeln!(f, "    {rule}")?;
            for line in &customer.lines {
                writeln!(
                    f,
                    "        {:<28}{:>10}",
                    format!("{} (order {})", line.item, line.order_id),
                    line.item_price.to_string()
                )?;
                for extra in &line.extras {
                    writeln!(
                        f,
                        "            {:<24}{:>10}",
                        format!("extra {}", extra.ingredient),
                        extra.cost.to_string()
                    )?;
                }
            }
            customer.statement.write_lines(f, "    ")?;
        }

        self.statement.write_lines(f, "")
    }
}
