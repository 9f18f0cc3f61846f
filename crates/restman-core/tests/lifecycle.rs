//! End-to-end order scenarios through the `Restaurant` command surface.

use restman_core::effect::RecordingSink;
use restman_core::prelude::*;

struct Kitchen {
    r: Restaurant,
    server: EmployeeId,
    cook: EmployeeId,
    table: TableId,
}

fn q(units: i64) -> Quantity {
    Quantity::from_units(units)
}

/// One table with two customers, a cheese burger and a plain soup on the menu.
fn kitchen() -> Kitchen {
    let mut r = Restaurant::new();
    let server = r.hire(EmployeeRole::Server, "alice").unwrap();
    let cook = r.hire(EmployeeRole::Cook, "bob").unwrap();
    let table = r.open_table();
    r.seat_customers(table, 2).unwrap();

    r.register_ingredient(
        Ingredient::new("cheese")
            .with_unit_cost(Money::from_cents(50))
            .with_threshold(q(2)),
    )
    .unwrap();
    let cheese = r.ledger_mut().ingredient("cheese").clone();

    r.add_menu_item(
        MenuItem::new("burger", Money::from_cents(1000))
            .unwrap()
            .with_ingredient(MenuIngredient::new(&cheese, q(0), q(1), q(4)).unwrap()),
    )
    .unwrap();
    r.add_menu_item(MenuItem::new("soup", Money::from_cents(500)).unwrap())
        .unwrap();

    Kitchen {
        r,
        server,
        cook,
        table,
    }
}

fn deliver(k: &mut Kitchen, customer: u32, item: &str) -> OrderId {
    let order = k.r.new_order(item).unwrap();
    let id = order.id();
    k.r.place_order(k.server, k.table, customer, order).unwrap();
    k.r.order_seen(k.cook, id).unwrap();
    k.r.order_ready(k.cook, id).unwrap();
    k.r.confirm_order(k.server, id).unwrap();
    id
}

#[test]
fn test_placing_deducts_stock_and_requests_restock() {
    let mut k = kitchen();
    k.r.set_stock("cheese", q(5)).unwrap();

    let mut order = k.r.new_order("burger").unwrap();
    order.set_ingredient_quantity("cheese", q(4)).unwrap();
    let effects = k.r.place_order(k.server, k.table, 1, order).unwrap();

    assert_eq!(k.r.ledger().stock_of("cheese"), q(1));

    let mut sink = RecordingSink::default();
    assert_eq!(sink.apply(&effects), 0);
    assert_eq!(sink.restocks.len(), 1);
    assert_eq!(sink.restocks[0].ingredient, "cheese");
    assert_eq!(sink.restocks[0].quantity, q(10));

    // One ingredient line, then the PLACED line
    assert_eq!(sink.audits.len(), 2);
    assert!(matches!(sink.audits[0], AuditEvent::Ingredient(_)));
    assert!(matches!(sink.audits[1], AuditEvent::Order(_)));
}

#[test]
fn test_infeasible_order_changes_nothing() {
    let mut k = kitchen();
    k.r.set_stock("cheese", q(3)).unwrap();

    let mut order = k.r.new_order("burger").unwrap();
    order.set_ingredient_quantity("cheese", q(4)).unwrap();
    let err = k.r.place_order(k.server, k.table, 1, order).unwrap_err();

    assert!(matches!(err, CoreError::InsufficientStock { .. }));
    assert_eq!(k.r.ledger().stock_of("cheese"), q(3));
    assert!(k.r.pending_orders().is_empty());
    assert!(k.r.order_index().is_empty());
    let customer = k.r.table(k.table).unwrap().customer(1).unwrap();
    assert!(customer.pending().is_empty());
}

#[test]
fn test_extra_cheese_is_charged() {
    let mut k = kitchen();
    let mut order = k.r.new_order("burger").unwrap();
    order.set_ingredient_quantity("cheese", q(3)).unwrap();

    let line = order.item().ingredient("cheese").unwrap();
    assert_eq!(line.extra_cost(), Money::from_cents(100));
    assert_eq!(order.price(), Money::from_cents(1100));

    // The menu template keeps its default
    let template = k.r.catalog().get("burger").unwrap();
    assert_eq!(template.ingredient("cheese").unwrap().quantity(), q(1));
}

#[test]
fn test_delivered_and_cancelled_lists() {
    let mut k = kitchen();
    let delivered = deliver(&mut k, 1, "soup");

    let order = k.r.new_order("soup").unwrap();
    let cancelled = order.id();
    k.r.place_order(k.server, k.table, 1, order).unwrap();
    k.r.order_seen(k.cook, cancelled).unwrap();
    k.r.order_ready(k.cook, cancelled).unwrap();
    k.r.cancel_order(k.server, cancelled).unwrap();

    let customer = k.r.table(k.table).unwrap().customer(1).unwrap();
    assert_eq!(customer.confirmed(), &[delivered]);
    assert!(customer.pending().is_empty());
    assert!(!customer.has_order(cancelled));
    assert!(k.r.queue_of(k.server).unwrap().is_empty());
}

#[test]
fn test_table_bill_and_second_bill_is_zero() {
    let mut k = kitchen();
    k.r.set_stock("cheese", q(20)).unwrap();
    deliver(&mut k, 1, "burger");
    deliver(&mut k, 2, "soup");

    let bill = k.r.bill_table(k.table).unwrap();
    assert_eq!(bill.customers.len(), 2);
    assert_eq!(bill.statement.subtotal, Money::from_cents(1500));
    assert_eq!(bill.statement.tax, Money::from_cents(195));
    assert_eq!(bill.statement.gratuity, Money::from_cents(225));
    assert_eq!(bill.statement.total, Money::from_cents(1920));

    let receipt = bill.to_string();
    assert!(receipt.contains("Customer #1"));
    assert!(receipt.contains("$19.20"));

    // Orders are retired with the party
    assert_eq!(k.r.orders().count(), 0);

    let again = k.r.bill_table(k.table).unwrap();
    assert!(again.customers.is_empty());
    assert_eq!(again.statement, Statement::default());
}

#[test]
fn test_customer_bill_is_read_only() {
    let mut k = kitchen();
    deliver(&mut k, 2, "soup");

    let first = k.r.bill_customer(k.table, 2).unwrap();
    let second = k.r.bill_customer(k.table, 2).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.statement.total, Money::from_cents(640));
    assert_eq!(k.r.bill_customer(k.table, 1).unwrap().lines.len(), 0);
}

#[test]
fn test_duplicate_terminal_transition_is_refused() {
    let mut k = kitchen();
    let id = deliver(&mut k, 1, "soup");

    let err = k.r.confirm_order(k.server, id).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTransition { .. }));
    let customer = k.r.table(k.table).unwrap().customer(1).unwrap();
    assert_eq!(customer.confirmed(), &[id]);
}

#[test]
fn test_every_transition_is_audited() {
    let mut k = kitchen();
    let order = k.r.new_order("soup").unwrap();
    let id = order.id();

    let mut sink = RecordingSink::default();
    sink.apply(&k.r.place_order(k.server, k.table, 1, order).unwrap());
    sink.apply(&k.r.order_seen(k.cook, id).unwrap());
    sink.apply(&k.r.order_ready(k.cook, id).unwrap());
    sink.apply(&k.r.reject_order(k.server, id, "wrong table").unwrap());

    let states: Vec<OrderState> = sink
        .audits
        .iter()
        .filter_map(|a| match a {
            AuditEvent::Order(e) => Some(e.state),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        vec![
            OrderState::Placed,
            OrderState::Preparing,
            OrderState::Ready,
            OrderState::Remake,
        ]
    );

    match sink.audits.last() {
        Some(AuditEvent::Order(e)) => assert_eq!(e.notes.as_deref(), Some("wrong table")),
        other => panic!("unexpected audit {other:?}"),
    }
}

#[test]
fn test_restaurant_survives_json_round_trip() {
    let mut k = kitchen();
    let order = k.r.new_order("soup").unwrap();
    let id = order.id();
    k.r.place_order(k.server, k.table, 1, order).unwrap();

    let json = serde_json::to_string(&k.r).unwrap();
    let mut restored: Restaurant = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.pending_orders()[0].id(), id);

    // Subscriptions survive, so the restored copy keeps dispatching
    restored.order_seen(k.cook, id).unwrap();
    restored.order_ready(k.cook, id).unwrap();
    restored.confirm_order(k.server, id).unwrap();
    let customer = restored.table(k.table).unwrap().customer(1).unwrap();
    assert_eq!(customer.confirmed(), &[id]);

    // Numbering continues after the restored orders
    assert!(restored.new_order("soup").unwrap().id() > id);
}
