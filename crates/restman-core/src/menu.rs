//! # Menu Catalog
//!
//! Menu items, their recipes, and the catalog of items the restaurant sells.
//!
//! ## Template vs Instance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (templates)              Order (instance)                      │
//! │  ┌─────────────────────┐          ┌─────────────────────┐               │
//! │  │ burger  $10.00      │  new()   │ #7 burger           │               │
//! │  │  cheese 0..=3 (1)   │ ───────► │  cheese 1 → 3       │ customised    │
//! │  │  bun    1..=1 (1)   │  copies  │  bun    1           │               │
//! │  └─────────────────────┘          └─────────────────────┘               │
//! │                                                                         │
//! │  Editing the order never touches the template.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`MenuIngredient`] copies the ingredient's name and unit cost when it is
//! built. The catalog re-snapshots costs when the manager changes one
//! ([`Catalog::refresh_costs`]). An order re-reads every cost from the
//! ledger when it is started and again when it is placed, so the price it is
//! quoted matches the ledger; once placed it keeps that price.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::ingredient::{normalize_name, Ingredient, IngredientLedger};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::validation::{validate_bounds, validate_name, validate_price};

/// Anything that lists ingredient quantities the kitchen must use.
pub trait Recipe {
    fn ingredients(&self) -> &[MenuIngredient];
}

// =============================================================================
// Menu Ingredient
// =============================================================================

/// One ingredient line of a recipe, with customisation bounds.
///
/// ## Rules
/// - `min <= default <= max`
/// - the ordered quantity stays within `min..=max`
/// - anything above `default` is charged at the unit cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuIngredient {
    ingredient: String,
    unit_cost: Money,
    min: Quantity,
    default: Quantity,
    max: Quantity,
    quantity: Quantity,
}

impl MenuIngredient {
    /// Creates a recipe line with customisation bounds.
    pub fn new(
        ingredient: &Ingredient,
        min: Quantity,
        default: Quantity,
        max: Quantity,
    ) -> CoreResult<Self> {
        validate_bounds(ingredient.name(), min, default, max)?;

        Ok(MenuIngredient {
            ingredient: ingredient.name().to_string(),
            unit_cost: ingredient.unit_cost(),
            min,
            default,
            max,
            quantity: default,
        })
    }

    /// A recipe line the customer cannot change.
    pub fn fixed(ingredient: &Ingredient, quantity: Quantity) -> CoreResult<Self> {
        Self::new(ingredient, quantity, quantity, quantity)
    }

    pub fn name(&self) -> &str {
        &self.ingredient
    }

    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    pub fn min(&self) -> Quantity {
        self.min
    }

    pub fn max(&self) -> Quantity {
        self.max
    }

    pub fn default_quantity(&self) -> Quantity {
        self.default
    }

    /// Quantity that will actually be used.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn is_changeable(&self) -> bool {
        self.min != self.max
    }

    pub fn is_valid_quantity(&self, quantity: Quantity) -> bool {
        self.min <= quantity && quantity <= self.max
    }

    /// Sets the ordered quantity. Out-of-bounds values are refused unchanged.
    pub fn set_quantity(&mut self, quantity: Quantity) -> CoreResult<()> {
        if !self.is_valid_quantity(quantity) {
            return Err(CoreError::QuantityOutOfBounds {
                ingredient: self.ingredient.clone(),
                requested: quantity,
                min: self.min,
                max: self.max,
            });
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Moves the default. An ordered quantity still at the old default follows it.
    pub fn set_default_quantity(&mut self, default: Quantity) -> CoreResult<()> {
        if !self.is_valid_quantity(default) {
            return Err(CoreError::QuantityOutOfBounds {
                ingredient: self.ingredient.clone(),
                requested: default,
                min: self.min,
                max: self.max,
            });
        }
        if self.quantity == self.default {
            self.quantity = default;
        }
        self.default = default;
        Ok(())
    }

    /// Replaces the bounds. The default must still fit; the ordered quantity
    /// falls back to the default if it no longer does.
    pub fn set_bounds(&mut self, min: Quantity, max: Quantity) -> CoreResult<()> {
        validate_bounds(&self.ingredient, min, self.default, max)?;
        self.min = min;
        self.max = max;
        if !self.is_valid_quantity(self.quantity) {
            self.quantity = self.default;
        }
        Ok(())
    }

    /// Charge for everything above the default quantity.
    pub fn extra_cost(&self) -> Money {
        self.unit_cost
            .for_quantity(self.quantity.saturating_excess(self.default))
    }

    /// Fresh copy for a new order, quantity reset to the default.
    pub fn instantiate(&self) -> Self {
        MenuIngredient {
            quantity: self.default,
            ..self.clone()
        }
    }

    fn refresh_cost(&mut self, ingredient: &Ingredient) {
        if self.ingredient == ingredient.name() {
            self.unit_cost = ingredient.unit_cost();
        }
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on the menu. Two items are equal when name and price match.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    name: String,
    price: Money,
    ingredients: Vec<MenuIngredient>,
}

impl PartialEq for MenuItem {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.price == other.price
    }
}

impl MenuItem {
    /// Creates an item with no ingredients. The name is stored lowercase.
    pub fn new(name: &str, price: Money) -> CoreResult<Self> {
        let name = validate_name("menu item name", name)?;
        validate_price("menu item price", price)?;

        Ok(MenuItem {
            name: normalize_name(&name),
            price,
            ingredients: Vec::new(),
        })
    }

    pub fn with_ingredient(mut self, ingredient: MenuIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn add_ingredient(&mut self, ingredient: MenuIngredient) {
        self.ingredients.push(ingredient);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base price, before extras.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn set_price(&mut self, price: Money) -> CoreResult<()> {
        validate_price("menu item price", price)?;
        self.price = price;
        Ok(())
    }

    pub fn ingredient(&self, name: &str) -> Option<&MenuIngredient> {
        let name = normalize_name(name);
        self.ingredients.iter().find(|i| i.name() == name)
    }

    pub fn ingredient_mut(&mut self, name: &str) -> CoreResult<&mut MenuIngredient> {
        let key = normalize_name(name);
        let item = self.name.clone();
        self.ingredients
            .iter_mut()
            .find(|i| i.name() == key)
            .ok_or(CoreError::IngredientNotInItem {
                item,
                ingredient: key,
            })
    }

    /// Recipe lines the customer may adjust.
    pub fn changeable_ingredients(&self) -> impl Iterator<Item = &MenuIngredient> {
        self.ingredients.iter().filter(|i| i.is_changeable())
    }

    /// Sum of the extra cost over every recipe line.
    pub fn extras_cost(&self) -> Money {
        self.ingredients.iter().map(MenuIngredient::extra_cost).sum()
    }

    /// Takes each line's unit cost from the ledger's current entry.
    /// Lines for ingredients the ledger does not know keep their cost.
    pub fn refresh_costs_from(&mut self, ledger: &IngredientLedger) {
        for line in &mut self.ingredients {
            if let Some(ingredient) = ledger.lookup(line.name()) {
                line.unit_cost = ingredient.unit_cost();
            }
        }
    }

    /// Copy with every recipe line reset to its default quantity.
    pub fn instantiate(&self) -> Self {
        MenuItem {
            name: self.name.clone(),
            price: self.price,
            ingredients: self.ingredients.iter().map(MenuIngredient::instantiate).collect(),
        }
    }
}

impl Recipe for MenuItem {
    fn ingredients(&self) -> &[MenuIngredient] {
        &self.ingredients
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Menu items on offer, in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: MenuItem) -> CoreResult<()> {
        if self.get(item.name()).is_some() {
            return Err(CoreError::DuplicateMenuItem(item.name().to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> CoreResult<MenuItem> {
        let key = normalize_name(name);
        let position = self
            .items
            .iter()
            .position(|i| i.name() == key)
            .ok_or(CoreError::MenuItemNotFound(key))?;
        Ok(self.items.remove(position))
    }

    pub fn get(&self, name: &str) -> Option<&MenuItem> {
        let key = normalize_name(name);
        self.items.iter().find(|i| i.name() == key)
    }

    pub fn get_mut(&mut self, name: &str) -> CoreResult<&mut MenuItem> {
        let key = normalize_name(name);
        self.items
            .iter_mut()
            .find(|i| i.name() == key)
            .ok_or(CoreError::MenuItemNotFound(key))
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Items whose default recipe the current stock can cover.
    pub fn available<'a>(&'a self, ledger: &'a IngredientLedger) -> impl Iterator<Item = &'a MenuItem> {
        self.items.iter().filter(move |i| ledger.is_feasible(*i))
    }

    /// Re-snapshots `ingredient`'s unit cost into every recipe that uses it.
    pub fn refresh_costs(&mut self, ingredient: &Ingredient) {
        for item in &mut self.items {
            for line in &mut item.ingredients {
                line.refresh_cost(ingredient);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cheese() -> Ingredient {
        Ingredient::new("Cheese").with_unit_cost(Money::from_cents(50))
    }

    fn q(units: i64) -> Quantity {
        Quantity::from_units(units)
    }

    #[test]
    fn test_menu_ingredient_bounds() {
        assert!(MenuIngredient::new(&cheese(), q(2), q(1), q(3)).is_err());

        let mut line = MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap();
        assert_eq!(line.name(), "cheese");
        assert_eq!(line.quantity(), q(1));
        assert!(line.is_changeable());

        let err = line.set_quantity(q(4)).unwrap_err();
        assert!(matches!(err, CoreError::QuantityOutOfBounds { .. }));
        assert_eq!(line.quantity(), q(1));
    }

    #[test]
    fn test_extra_cost_above_default() {
        let mut line = MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap();
        assert_eq!(line.extra_cost(), Money::zero());

        line.set_quantity(q(3)).unwrap();
        assert_eq!(line.extra_cost().cents(), 100);

        // Below default is never a discount
        line.set_quantity(q(0)).unwrap();
        assert_eq!(line.extra_cost(), Money::zero());
    }

    #[test]
    fn test_set_default_quantity_follows_when_untouched() {
        let mut line = MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap();
        line.set_default_quantity(q(2)).unwrap();
        assert_eq!(line.quantity(), q(2));

        line.set_quantity(q(3)).unwrap();
        line.set_default_quantity(q(1)).unwrap();
        assert_eq!(line.quantity(), q(3));
        assert_eq!(line.default_quantity(), q(1));

        assert!(line.set_default_quantity(q(9)).is_err());
    }

    #[test]
    fn test_set_bounds_clamps_to_default() {
        let mut line = MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap();
        line.set_quantity(q(3)).unwrap();

        line.set_bounds(q(1), q(2)).unwrap();
        assert_eq!(line.quantity(), q(1));
        assert!(line.set_bounds(q(2), q(3)).is_err());
    }

    #[test]
    fn test_instantiate_resets_quantity() {
        let mut template = MenuItem::new("Burger", Money::from_cents(1000))
            .unwrap()
            .with_ingredient(MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap());
        template.ingredient_mut("cheese").unwrap().set_quantity(q(2)).unwrap();

        let copy = template.instantiate();
        assert_eq!(copy.ingredient("cheese").unwrap().quantity(), q(1));
        assert_eq!(copy, template);
    }

    #[test]
    fn test_menu_item_equality_is_name_and_price() {
        let a = MenuItem::new("Burger", Money::from_cents(1000)).unwrap();
        let b = MenuItem::new("burger", Money::from_cents(1000))
            .unwrap()
            .with_ingredient(MenuIngredient::fixed(&cheese(), q(1)).unwrap());
        let c = MenuItem::new("burger", Money::from_cents(1100)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_changeable_ingredients() {
        let bun = Ingredient::new("bun");
        let item = MenuItem::new("Burger", Money::from_cents(1000))
            .unwrap()
            .with_ingredient(MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap())
            .with_ingredient(MenuIngredient::fixed(&bun, q(1)).unwrap());

        let names: Vec<&str> = item.changeable_ingredients().map(|i| i.name()).collect();
        assert_eq!(names, vec!["cheese"]);
        assert!(item.ingredient("pickle").is_none());
    }

    #[test]
    fn test_refresh_costs_from_ledger() {
        let mut ledger = IngredientLedger::new();
        ledger.register(cheese());
        let mut item = MenuItem::new("Burger", Money::from_cents(1000))
            .unwrap()
            .with_ingredient(MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap())
            .with_ingredient(MenuIngredient::fixed(&Ingredient::new("bun"), q(1)).unwrap());

        ledger.ingredient_mut("cheese").set_unit_cost(Money::from_cents(80));
        item.refresh_costs_from(&ledger);
        assert_eq!(item.ingredient("cheese").unwrap().unit_cost().cents(), 80);
        // Unknown to the ledger, and not registered by the refresh
        assert_eq!(item.ingredient("bun").unwrap().unit_cost(), Money::zero());
        assert!(ledger.lookup("bun").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let mut catalog = Catalog::new();
        catalog
            .add(MenuItem::new("Fries", Money::from_cents(400)).unwrap())
            .unwrap();
        let err = catalog
            .add(MenuItem::new("FRIES", Money::from_cents(500)).unwrap())
            .unwrap_err();
        assert_eq!(err, CoreError::DuplicateMenuItem("fries".to_string()));

        assert!(catalog.remove("fries").is_ok());
        assert!(catalog.remove("fries").is_err());
    }

    #[test]
    fn test_catalog_available_filters_by_stock() {
        let mut ledger = IngredientLedger::new();
        let potato = ledger.ingredient("potato").clone();
        let mut catalog = Catalog::new();
        catalog
            .add(
                MenuItem::new("fries", Money::from_cents(400))
                    .unwrap()
                    .with_ingredient(MenuIngredient::fixed(&potato, q(2)).unwrap()),
            )
            .unwrap();
        catalog
            .add(MenuItem::new("water", Money::zero()).unwrap())
            .unwrap();

        let names: Vec<&str> = catalog.available(&ledger).map(|i| i.name()).collect();
        assert_eq!(names, vec!["water"]);

        ledger.set_quantity("potato", q(2)).unwrap();
        assert_eq!(catalog.available(&ledger).count(), 2);
    }

    #[test]
    fn test_refresh_costs() {
        let mut catalog = Catalog::new();
        catalog
            .add(
                MenuItem::new("burger", Money::from_cents(1000))
                    .unwrap()
                    .with_ingredient(MenuIngredient::new(&cheese(), q(0), q(1), q(3)).unwrap()),
            )
            .unwrap();

        let pricier = cheese().with_unit_cost(Money::from_cents(75));
        catalog.refresh_costs(&pricier);
        let line = catalog.get("burger").unwrap().ingredient("cheese").unwrap();
        assert_eq!(line.unit_cost().cents(), 75);
    }
}
