//! # Demo Restaurant Seeder
//!
//! Writes a small, ready-to-use restaurant snapshot for development.
//!
//! ## Usage
//! ```bash
//! # Seed into the configured data directory
//! cargo run -p restman-store --bin seed
//!
//! # Seed into a specific directory
//! cargo run -p restman-store --bin seed -- --dir ./data
//!
//! # Overwrite an existing snapshot
//! cargo run -p restman-store --bin seed -- --force
//! ```
//!
//! ## Seeded Data
//! - Staff: the `admin` manager, two servers, two cooks
//! - Ingredients with unit costs and thresholds, stocked above threshold
//! - A menu of burgers, pizza, salad, fries and drinks
//! - Three open tables, one with a party of four already seated

use std::env;
use std::path::PathBuf;

use restman_core::prelude::*;
use restman_store::config::PathSettings;
use restman_store::{init_tracing, RestaurantState, RestmanConfig, SnapshotStore};

/// (name, unit cost in cents, threshold, opening stock)
const INGREDIENTS: &[(&str, i64, i64, i64)] = &[
    ("bun", 25, 10, 60),
    ("beef patty", 150, 10, 40),
    ("cheese", 50, 10, 80),
    ("lettuce", 10, 5, 30),
    ("tomato", 20, 5, 30),
    ("dough", 80, 5, 25),
    ("tomato sauce", 30, 5, 25),
    ("potato", 15, 20, 100),
    ("cola", 60, 12, 48),
];

/// (ingredient, min, default, max) in whole units
type Line = (&'static str, i64, i64, i64);

/// (name, price in cents, recipe)
const MENU: &[(&str, i64, &[Line])] = &[
    (
        "hamburger",
        899,
        &[("bun", 1, 1, 1), ("beef patty", 1, 1, 2), ("lettuce", 0, 1, 2), ("tomato", 0, 1, 2)],
    ),
    (
        "cheeseburger",
        999,
        &[("bun", 1, 1, 1), ("beef patty", 1, 1, 2), ("cheese", 0, 1, 3)],
    ),
    (
        "pizza",
        1250,
        &[("dough", 1, 1, 1), ("tomato sauce", 0, 1, 2), ("cheese", 1, 2, 4)],
    ),
    ("garden salad", 750, &[("lettuce", 1, 2, 3), ("tomato", 0, 1, 2)]),
    ("fries", 399, &[("potato", 2, 2, 2)]),
    ("cola", 249, &[("cola", 1, 1, 1)]),
];

fn build_restaurant() -> CoreResult<Restaurant> {
    let mut r = Restaurant::new();

    r.hire(EmployeeRole::Server, "alice")?;
    r.hire(EmployeeRole::Server, "marco")?;
    r.hire(EmployeeRole::Cook, "bob")?;
    r.hire(EmployeeRole::Cook, "yuki")?;

    for &(name, cost, threshold, stock) in INGREDIENTS {
        r.register_ingredient(
            Ingredient::new(name)
                .with_unit_cost(Money::from_cents(cost))
                .with_threshold(Quantity::from_units(threshold)),
        )?;
        r.set_stock(name, Quantity::from_units(stock))?;
    }

    for &(name, price, recipe) in MENU {
        let mut item = MenuItem::new(name, Money::from_cents(price))?;
        for &(ingredient, min, default, max) in recipe {
            let ingredient = r.ledger_mut().ingredient(ingredient).clone();
            item.add_ingredient(MenuIngredient::new(
                &ingredient,
                Quantity::from_units(min),
                Quantity::from_units(default),
                Quantity::from_units(max),
            )?);
        }
        r.add_menu_item(item)?;
    }

    let first = r.open_table();
    r.open_table();
    r.open_table();
    r.seat_customers(first, 4)?;

    Ok(r)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut dir: Option<PathBuf> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Restman Demo Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Data directory (default: from restman.toml)");
                println!("  -f, --force        Overwrite an existing snapshot");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = RestmanConfig::load(None)?;
    if let Some(dir) = dir {
        config.paths = PathSettings::in_dir(&dir);
    }

    println!("Restman Demo Seeder");
    println!("===================");
    println!("Snapshot: {}", config.paths.snapshot.display());
    println!();

    let snapshot = SnapshotStore::new(&config.paths.snapshot);
    if !force && snapshot.load().is_some() {
        println!("⚠ A snapshot already exists.");
        println!("  Run with --force to replace it.");
        return Ok(());
    }

    let mut restaurant = build_restaurant()?;
    restaurant
        .ledger_mut()
        .set_restock_quantity(config.restock_quantity());

    println!("✓ {} employees", restaurant.staff().len());
    println!("✓ {} ingredients", restaurant.ledger().len());
    println!("✓ {} menu items", restaurant.catalog().items().len());
    println!("✓ {} tables", restaurant.tables().count());

    let state = RestaurantState::new(restaurant, restman_store::FileSink::from_config(&config), snapshot);
    if !state.save() {
        return Err("failed to write snapshot".into());
    }

    println!();
    println!("Done. Snapshot written to {}", config.paths.snapshot.display());
    Ok(())
}
