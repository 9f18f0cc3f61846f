//! # Quantity Module
//!
//! Ingredient amounts in fixed-point hundredths of a unit.
//!
//! Stock levels, recipe bounds and order customisations are all compared
//! and subtracted, so they get the same treatment as `Money`: integers
//! underneath, two decimals on display (`4.00`, `0.50`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

/// An amount of an ingredient, stored as hundredths of a unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Hundredths per whole unit.
    pub const SCALE: i64 = 100;

    /// Creates a quantity of whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * Self::SCALE)
    }

    /// Creates a quantity from hundredths of a unit (`50` is half a unit).
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Quantity(hundredths)
    }

    /// Returns the raw hundredths.
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Absolute difference between two quantities, capped at the largest quantity.
    #[inline]
    pub const fn abs_diff(&self, other: Quantity) -> Quantity {
        let diff = self.0.abs_diff(other.0);
        if diff > i64::MAX as u64 {
            Quantity(i64::MAX)
        } else {
            Quantity(diff as i64)
        }
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Quantity) -> Option<Quantity> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Quantity(sum)),
            None => None,
        }
    }

    /// `self - other`, or `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Quantity) -> Option<Quantity> {
        match self.0.checked_sub(other.0) {
            Some(difference) => Some(Quantity(difference)),
            None => None,
        }
    }

    /// `self - other`, or zero when `other` is larger.
    #[inline]
    pub const fn saturating_excess(&self, other: Quantity) -> Quantity {
        if self.0 > other.0 {
            Quantity(self.0.saturating_sub(other.0))
        } else {
            Quantity(0)
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(f, "{}{}.{:02}", sign, abs / scale, abs % scale)
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0.saturating_add(other.0))
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0.saturating_sub(other.0))
    }
}
