//! # Money Module
//!
//! Provides the `Money` and `Rate` types for every price in the restaurant.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A bill summed in floating point:                                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Order prices, extra ingredient costs, tax and gratuity are all      │
//! │    whole cents. Rounding happens once, at the cent, and is explicit.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use restman_core::money::{Money, Rate};
//!
//! let burger = Money::from_cents(1099); // $10.99
//! let fries = Money::from_cents(399);   // $3.99
//! assert_eq!((burger + fries).cents(), 1498);
//!
//! // 13% tax, rounded half-up at the cent
//! let tax = Money::from_cents(1500).apply_rate(Rate::from_bps(1300));
//! assert_eq!(tax.cents(), 195);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::quantity::Quantity;

// =============================================================================
// Rate
// =============================================================================

/// A surcharge rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1300 bps = 13% (HST), 12800 bps = 128% (subtotal + tax + gratuity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  MenuItem.price ────────────┐                                           │
/// │                             ├──► Order.price ──► Customer subtotal     │
/// │  MenuIngredient.extra_cost ─┘                         │                 │
/// │                                                       ▼                 │
/// │                               Tax / Gratuity / Total (Rate applied)    │
/// │                                                                         │
/// │  Ingredient.unit_cost × Quantity ──► audit "Cost:" column              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use restman_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a rate, rounding half-up at the cent.
    ///
    /// ## Implementation
    /// `(amount * bps + 5000) / 10000` in i128. The +5000 is half a unit
    /// of the divisor, so 0.5 cents rounds up.
    ///
    /// ## Example
    /// ```rust
    /// use restman_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::from_cents(1500);             // $15.00
    /// let gratuity = subtotal.apply_rate(Rate::from_bps(1500)); // 15%
    /// assert_eq!(gratuity.cents(), 225);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000).div_euclid(10000);
        Money::saturating_from(cents)
    }

    /// Cost of `quantity` units at `self` per unit, rounded half-up at the cent.
    ///
    /// ## Example
    /// ```rust
    /// use restman_core::money::Money;
    /// use restman_core::quantity::Quantity;
    ///
    /// let cheese = Money::from_cents(50); // $0.50 per unit
    /// assert_eq!(cheese.for_quantity(Quantity::from_units(2)).cents(), 100);
    /// assert_eq!(cheese.for_quantity(Quantity::from_hundredths(25)).cents(), 13);
    /// ```
    pub fn for_quantity(&self, quantity: Quantity) -> Money {
        let scale = Quantity::SCALE as i128;
        let cents = (self.0 as i128 * quantity.hundredths() as i128 + scale / 2).div_euclid(scale);
        Money::saturating_from(cents)
    }

    /// Clamps a wide intermediate result into the `i64` range.
    fn saturating_from(cents: i128) -> Money {
        Money(cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$10.99`, the format bills and screens use.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // $0.50 at 13% = 6.5 cents → 7 cents
        let amount = Money::from_cents(50);
        assert_eq!(amount.apply_rate(Rate::from_bps(1300)).cents(), 7);

        // $0.10 at 15% = 1.5 cents → 2 cents
        let amount = Money::from_cents(10);
        assert_eq!(amount.apply_rate(Rate::from_bps(1500)).cents(), 2);
    }

    #[test]
    fn test_apply_rate_grand_total() {
        let subtotal = Money::from_cents(1500);
        assert_eq!(subtotal.apply_rate(Rate::from_bps(12800)).cents(), 1920);
    }

    #[test]
    fn test_for_quantity() {
        let unit = Money::from_cents(50);
        assert_eq!(unit.for_quantity(Quantity::from_units(2)).cents(), 100);
        assert_eq!(unit.for_quantity(Quantity::zero()).cents(), 0);

        // 0.33 × $0.25 = 8.25 cents → 8 cents
        let unit = Money::from_cents(25);
        assert_eq!(unit.for_quantity(Quantity::from_hundredths(33)).cents(), 8);
    }

    #[test]
    fn test_for_quantity_saturates() {
        let unit = Money::from_cents(500);
        let cost = unit.for_quantity(Quantity::from_hundredths(i64::MAX));
        assert_eq!(cost.cents(), i64::MAX);
    }

    #[test]
    fn test_rate_percentage() {
        let rate = Rate::from_bps(1300);
        assert_eq!(rate.bps(), 1300);
        assert!((rate.percentage() - 13.0).abs() < 0.001);
    }
}
