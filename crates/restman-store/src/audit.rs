//! # Audit Log
//!
//! Plain-text, append-only record of everything that happened on the floor.
//!
//! ## Line Formats
//! ```text
//! 2026/10/18 | 19:02:11 | ORDER PLACED | server: alice (#2) | Order ID:7 | Ordered Item: burger | Order Price: 11.00 | Note: no onions
//! 2026/10/18 | 19:02:11 | INGREDIENT USED | Old Quantity: 5.00 | New Quantity: 1.00 | Change: 4.00 | Cost: 2.00
//! 2026/10/18 | 19:00:40 | CUSTOMERS SEATED | Number of Customers: 2 | Table Number: 4
//! ```
//!
//! The reporting tools read this file line by line, so the column layout is
//! fixed. Ingredient events that did not change the level are not written.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use restman_core::effect::{AuditEvent, OrderEvent, SeatingEvent};
use restman_core::ingredient::{ChangeKind, QuantityChange};
use restman_core::Money;

use crate::error::{StoreError, StoreResult};

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d | %H:%M:%S";

/// Money without the currency sign, as the log columns expect.
fn plain(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.dollars().abs(), amount.cents_part())
}

fn order_line(event: &OrderEvent) -> String {
    let mut line = format!(
        "ORDER {} | {} | Order ID:{} | Ordered Item: {} | Order Price: {}",
        event.state,
        event.employee,
        event.order_id.value(),
        event.item,
        plain(event.price)
    );
    if let Some(notes) = event.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        line.push_str(" | Note: ");
        line.push_str(&notes.replace('\n', "; "));
    }
    line
}

fn ingredient_line(change: &QuantityChange) -> Option<String> {
    if change.is_noop() {
        return None;
    }
    let kind = match change.kind() {
        ChangeKind::Added => "ADDED",
        ChangeKind::Used => "USED",
    };
    Some(format!(
        "INGREDIENT {} | Old Quantity: {} | New Quantity: {} | Change: {} | Cost: {}",
        kind,
        change.old,
        change.new,
        change.change(),
        plain(change.cost())
    ))
}

fn seating_line(event: &SeatingEvent) -> String {
    format!(
        "CUSTOMERS SEATED | Number of Customers: {} | Table Number: {}",
        event.count, event.table_id
    )
}

/// Formats one event after the timestamp, or `None` if it is not logged.
pub fn format_event(event: &AuditEvent) -> Option<String> {
    match event {
        AuditEvent::Order(e) => Some(order_line(e)),
        AuditEvent::Ingredient(c) => ingredient_line(c),
        AuditEvent::Seating(e) => Some(seating_line(e)),
    }
}

// =============================================================================
// Audit Log File
// =============================================================================

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AuditLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the event. Returns `Ok(false)` when the event is suppressed.
    pub fn append(&self, event: &AuditEvent) -> StoreResult<bool> {
        let Some(body) = format_event(event) else {
            return Ok(false);
        };
        let stamp = Local::now().format(TIMESTAMP_FORMAT);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        writeln!(file, "{stamp} | {body}").map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = ?self.path, "Audit line written");
        Ok(true)
    }

    /// Appends the event, logging instead of failing.
    pub fn record(&self, event: &AuditEvent) -> bool {
        match self.append(event) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Failed to write audit line");
                false
            }
        }
    }

    /// Every line written so far.
    pub fn lines(&self) -> StoreResult<Vec<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restman_core::customer::TableId;
    use restman_core::order::{OrderId, OrderState};
    use restman_core::Quantity;

    fn order_event(notes: Option<&str>) -> AuditEvent {
        AuditEvent::Order(OrderEvent {
            state: OrderState::Placed,
            employee: "server: alice (#2)".to_string(),
            order_id: OrderId::new(7),
            item: "burger".to_string(),
            price: Money::from_cents(1100),
            notes: notes.map(str::to_string),
        })
    }

    #[test]
    fn test_order_line() {
        assert_eq!(
            format_event(&order_event(None)).unwrap(),
            "ORDER PLACED | server: alice (#2) | Order ID:7 | Ordered Item: burger | Order Price: 11.00"
        );
        assert!(format_event(&order_event(Some("no onions; extra pickles")))
            .unwrap()
            .ends_with(" | Note: no onions; extra pickles"));
        assert!(!format_event(&order_event(Some("  "))).unwrap().contains("Note"));
    }

    #[test]
    fn test_ingredient_line() {
        let change = QuantityChange {
            ingredient: "cheese".to_string(),
            old: Quantity::from_units(5),
            new: Quantity::from_units(1),
            unit_cost: Money::from_cents(50),
        };
        assert_eq!(
            format_event(&AuditEvent::Ingredient(change)).unwrap(),
            "INGREDIENT USED | Old Quantity: 5.00 | New Quantity: 1.00 | Change: 4.00 | Cost: 2.00"
        );
    }

    #[test]
    fn test_unchanged_ingredient_is_suppressed() {
        let change = QuantityChange {
            ingredient: "cheese".to_string(),
            old: Quantity::from_units(3),
            new: Quantity::from_units(3),
            unit_cost: Money::zero(),
        };
        assert_eq!(format_event(&AuditEvent::Ingredient(change)), None);
    }

    #[test]
    fn test_append_writes_stamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("log.txt"));
        assert!(log.lines().unwrap().is_empty());

        let seating = AuditEvent::Seating(SeatingEvent {
            table_id: TableId::new(4),
            count: 2,
        });
        assert!(log.append(&seating).unwrap());
        assert!(log.record(&order_event(None)));

        let lines = log.lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("| CUSTOMERS SEATED | Number of Customers: 2 | Table Number: 4"));
        // yyyy/mm/dd | hh:mm:ss | ...
        assert_eq!(&lines[0][4..5], "/");
        assert_eq!(&lines[0][10..13], " | ");
    }

    #[test]
    fn test_record_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let log = AuditLog::new(dir.path());
        assert!(!log.record(&order_event(None)));
    }
}
