//! # Ingredient Ledger
//!
//! Stock on hand for every ingredient the kitchen uses.
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ingredient Ledger                                │
//! │                                                                         │
//! │  Shipment ──► add("cheese", 20) ──────────┐                             │
//! │                                           ▼                             │
//! │                                  ┌─────────────────┐                    │
//! │  Server ──► is_feasible(order) ─►│ cheese : 21.00  │                    │
//! │                                  │ bun    :  8.00  │                    │
//! │                                  └────────┬────────┘                    │
//! │                                           │                             │
//! │  Order PLACED ──► consume(order) ─────────┤ all-or-nothing              │
//! │                                           ▼                             │
//! │                     stock <= threshold? ──► RestockSignal(10.00)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Reads
//! Looking up an unknown ingredient by name through [`IngredientLedger::ingredient`]
//! or [`IngredientLedger::quantity_of`] registers it at zero stock. The pure
//! readers ([`IngredientLedger::lookup`], [`IngredientLedger::stock_of`],
//! [`IngredientLedger::is_feasible`]) never register anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bus::OrderObserver;
use crate::effect::{AuditEvent, Effect};
use crate::error::{CoreError, CoreResult};
use crate::menu::Recipe;
use crate::money::Money;
use crate::order::{Order, OrderState};
use crate::quantity::Quantity;
use crate::{DEFAULT_RESTOCK_QUANTITY, DEFAULT_THRESHOLD};

/// Canonical form of an ingredient name: trimmed, lowercase.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Ingredient
// =============================================================================

/// A stocked ingredient. Identity is the lowercase name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    name: String,
    unit_cost: Money,
    threshold: Quantity,
}

impl Ingredient {
    /// Creates an ingredient with zero cost and the default threshold.
    pub fn new(name: &str) -> Self {
        Ingredient {
            name: normalize_name(name),
            unit_cost: Money::zero(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_unit_cost(mut self, unit_cost: Money) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    pub fn with_threshold(mut self, threshold: Quantity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    pub fn set_unit_cost(&mut self, unit_cost: Money) {
        self.unit_cost = unit_cost;
    }

    /// Stock level at or below which a restock request is raised.
    pub fn threshold(&self) -> Quantity {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Quantity) {
        self.threshold = threshold;
    }
}

// =============================================================================
// Audit Records
// =============================================================================

/// Direction of a stock change, as printed in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Used,
}

/// One stock mutation, old → new.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChange {
    pub ingredient: String,
    pub old: Quantity,
    pub new: Quantity,
    pub unit_cost: Money,
}

impl QuantityChange {
    /// True when the stock level did not actually move.
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }

    pub fn kind(&self) -> ChangeKind {
        if self.new > self.old {
            ChangeKind::Added
        } else {
            ChangeKind::Used
        }
    }

    /// Size of the change, always positive.
    pub fn change(&self) -> Quantity {
        self.new.abs_diff(self.old)
    }

    /// Value of the change at the ingredient's unit cost.
    pub fn cost(&self) -> Money {
        self.unit_cost.for_quantity(self.change())
    }
}

/// Request for the supplier to send more of an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockSignal {
    pub ingredient: String,
    pub quantity: Quantity,
}

/// Result of deducting a whole order from stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consumption {
    pub changes: Vec<QuantityChange>,
    pub restock: Vec<RestockSignal>,
}

// =============================================================================
// Ledger
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StockLevel {
    ingredient: Ingredient,
    on_hand: Quantity,
}

/// Quantity on hand per ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientLedger {
    stock: BTreeMap<String, StockLevel>,
    restock_quantity: Quantity,
}

impl Default for IngredientLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientLedger {
    pub fn new() -> Self {
        IngredientLedger {
            stock: BTreeMap::new(),
            restock_quantity: DEFAULT_RESTOCK_QUANTITY,
        }
    }

    /// Amount requested from the supplier each time a threshold is crossed.
    pub fn restock_quantity(&self) -> Quantity {
        self.restock_quantity
    }

    pub fn set_restock_quantity(&mut self, quantity: Quantity) {
        self.restock_quantity = quantity;
    }

    fn entry(&mut self, name: &str) -> &mut StockLevel {
        let key = normalize_name(name);
        self.stock.entry(key).or_insert_with_key(|key| StockLevel {
            ingredient: Ingredient::new(key),
            on_hand: Quantity::zero(),
        })
    }

    /// Returns the ingredient, registering it at zero stock if unseen.
    pub fn ingredient(&mut self, name: &str) -> &Ingredient {
        &self.entry(name).ingredient
    }

    /// Mutable access to an ingredient, registering it if unseen.
    pub fn ingredient_mut(&mut self, name: &str) -> &mut Ingredient {
        &mut self.entry(name).ingredient
    }

    /// Registers a fully described ingredient, keeping existing stock.
    pub fn register(&mut self, ingredient: Ingredient) -> &Ingredient {
        let entry = self.entry(ingredient.name());
        entry.ingredient = ingredient;
        &entry.ingredient
    }

    /// Pure lookup, never registers.
    pub fn lookup(&self, name: &str) -> Option<&Ingredient> {
        self.stock.get(&normalize_name(name)).map(|s| &s.ingredient)
    }

    /// Current stock, registering the ingredient at zero if unseen.
    pub fn quantity_of(&mut self, name: &str) -> Quantity {
        self.entry(name).on_hand
    }

    /// Current stock without registering; unknown ingredients read as zero.
    pub fn stock_of(&self, name: &str) -> Quantity {
        self.stock
            .get(&normalize_name(name))
            .map(|s| s.on_hand)
            .unwrap_or_default()
    }

    /// Sets the stock level. Negative targets are refused without mutation.
    pub fn set_quantity(&mut self, name: &str, quantity: Quantity) -> CoreResult<QuantityChange> {
        if quantity.is_negative() {
            return Err(CoreError::NegativeStock {
                ingredient: normalize_name(name),
                quantity,
            });
        }

        let entry = self.entry(name);
        let old = entry.on_hand;
        entry.on_hand = quantity;

        Ok(QuantityChange {
            ingredient: entry.ingredient.name().to_string(),
            old,
            new: quantity,
            unit_cost: entry.ingredient.unit_cost(),
        })
    }

    /// Adds received stock. Fails with `StockOverflow` instead of wrapping.
    pub fn add(&mut self, name: &str, quantity: Quantity) -> CoreResult<QuantityChange> {
        let current = self.quantity_of(name);
        let target = current
            .checked_add(quantity)
            .ok_or_else(|| CoreError::StockOverflow {
                ingredient: normalize_name(name),
                current,
                change: quantity,
            })?;
        self.set_quantity(name, target)
    }

    /// Takes stock away. Fails with `NegativeStock` when there is not enough.
    pub fn use_ingredient(&mut self, name: &str, quantity: Quantity) -> CoreResult<QuantityChange> {
        let current = self.quantity_of(name);
        let target = current
            .checked_sub(quantity)
            .ok_or_else(|| CoreError::StockOverflow {
                ingredient: normalize_name(name),
                current,
                change: quantity,
            })?;
        self.set_quantity(name, target)
    }

    /// Deregisters an ingredient and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Ingredient> {
        self.stock
            .remove(&normalize_name(name))
            .map(|s| s.ingredient)
    }

    /// All ingredients with their stock, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&Ingredient, Quantity)> {
        self.stock.values().map(|s| (&s.ingredient, s.on_hand))
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Total requested per ingredient. A recipe may list one ingredient twice.
    fn requirements(recipe: &impl Recipe) -> BTreeMap<String, Quantity> {
        let mut needed: BTreeMap<String, Quantity> = BTreeMap::new();
        for item in recipe.ingredients() {
            let total = needed.entry(normalize_name(item.name())).or_default();
            *total = *total + item.quantity();
        }
        needed
    }

    /// Checks every required ingredient and reports the first shortfall.
    pub fn check_feasible(&self, recipe: &impl Recipe) -> CoreResult<()> {
        for (name, requested) in Self::requirements(recipe) {
            let available = self.stock_of(&name);
            if requested > available {
                return Err(CoreError::InsufficientStock {
                    ingredient: name,
                    available,
                    requested,
                });
            }
        }
        Ok(())
    }

    /// True when current stock covers the whole recipe.
    pub fn is_feasible(&self, recipe: &impl Recipe) -> bool {
        self.check_feasible(recipe).is_ok()
    }

    /// Deducts a whole recipe, or nothing at all.
    ///
    /// ## Algorithm
    /// 1. Aggregate requirements per ingredient
    /// 2. Verify every one is covered (no mutation yet)
    /// 3. Deduct each, then compare the new level with its threshold
    pub fn consume(&mut self, recipe: &impl Recipe) -> CoreResult<Consumption> {
        self.check_feasible(recipe)?;

        let mut consumption = Consumption::default();
        for (name, requested) in Self::requirements(recipe) {
            let change = self.use_ingredient(&name, requested)?;
            let threshold = self.ingredient(&name).threshold();
            if change.new <= threshold {
                consumption.restock.push(RestockSignal {
                    ingredient: name,
                    quantity: self.restock_quantity,
                });
            }
            consumption.changes.push(change);
        }

        Ok(consumption)
    }
}

impl OrderObserver for IngredientLedger {
    fn on_order_state_changed(&mut self, order: &Order, state: OrderState) -> Vec<Effect> {
        if state != OrderState::Placed {
            return Vec::new();
        }

        // Feasibility was checked by the placing command under the same borrow,
        // so a failure here leaves stock untouched and emits nothing.
        let Ok(consumption) = self.consume(order) else {
            return Vec::new();
        };

        let mut effects: Vec<Effect> = consumption
            .changes
            .into_iter()
            .filter(|c| !c.is_noop())
            .map(|c| Effect::Audit(AuditEvent::Ingredient(c)))
            .collect();
        effects.extend(consumption.restock.into_iter().map(Effect::Restock));
        effects
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
