//! # Price Module
//!
//! Provides the `Price` type for monetary values in the catalog and cart.
//!
//! ## Precision Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  Catalog price 29.99, 17% off:                                          │
//! │    final price = 29.99 × 0.83 = 24.8917   ← stored UNROUNDED            │
//! │    × quantity 2 = 49.7834                 ← stored UNROUNDED            │
//! │    Display::fmt → "$49.78"                ← rounded HERE, and only here │
//! │                                                                         │
//! │  Stored values keep full precision so repeated discount/quantity math   │
//! │  never accumulates rounding drift; currency precision (2 decimal        │
//! │  places) is applied at presentation time only.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::price::Price;
//!
//! let price = Price::new(24.99);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                   // 49.98
//! let total = price + Price::new(5.00);      // 29.99
//!
//! // Rounding is presentation-only
//! assert_eq!(Price::new(49.7834).to_string(), "$49.78");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Tolerance for zero/equality checks on stored amounts.
///
/// Amounts are products of catalog prices, quantities, and percentage
/// factors, so anything below a thousandth of a cent is arithmetic noise.
const EPSILON: f64 = 1e-9;

// =============================================================================
// Price Type
// =============================================================================

/// A monetary value in major currency units, stored unrounded.
///
/// ## Design Decisions
/// - **f64 (signed)**: discount math (`29.99 × 0.83`) must keep sub-cent
///   precision in the stored value; rounding is deferred to display
/// - **Single field tuple struct**: zero-cost abstraction over f64
/// - **No `Eq`/`Hash`**: floating-point amounts compare with `PartialEq` only;
///   use [`Price::approx_eq`] where tolerance matters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    /// Creates a Price from an amount in major currency units.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::price::Price;
    ///
    /// let price = Price::new(24.99);
    /// assert_eq!(price.amount(), 24.99);
    /// ```
    #[inline]
    pub fn new(amount: f64) -> Self {
        Price(amount)
    }

    /// Returns the stored (unrounded) amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Returns the amount rounded to currency precision (2 decimal places).
    ///
    /// Presentation-time only; never feed the result back into stored state.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::price::Price;
    ///
    /// assert_eq!(Price::new(24.8917).rounded(), 24.89);
    /// assert_eq!(Price::new(49.7834).rounded(), 49.78);
    /// ```
    #[inline]
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }

    /// Zero price value.
    #[inline]
    pub fn zero() -> Self {
        Price(0.0)
    }

    /// Checks if the value is zero (within tolerance).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.abs() < EPSILON
    }

    /// Checks if the value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < -EPSILON
    }

    /// Compares two prices within arithmetic tolerance.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::price::Price;
    ///
    /// let a = Price::new(0.1) + Price::new(0.2);
    /// assert!(a.approx_eq(Price::new(0.3)));
    /// ```
    #[inline]
    pub fn approx_eq(&self, other: Price) -> bool {
        (self.0 - other.0).abs() < EPSILON
    }

    /// Multiplies the price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::price::Price;
    ///
    /// let unit_price = Price::new(24.8917);
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert!(line_total.approx_eq(Price::new(49.7834)));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Price(self.0 * qty as f64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `percent` - Discount percentage (17 = 17% off)
    ///
    /// ## Example
    /// ```rust
    /// use market_core::price::Price;
    ///
    /// let original = Price::new(29.99);
    /// let discounted = original.apply_discount(17);
    /// assert!(discounted.approx_eq(Price::new(24.8917)));
    /// ```
    pub fn apply_discount(&self, percent: u8) -> Price {
        Price(self.0 * (1.0 - percent as f64 / 100.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the price rounded to currency precision.
///
/// This is the presentation boundary: formatting is the only place the
/// 2-decimal rounding is applied.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded < 0.0 { "-" } else { "" };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

/// Addition of two Price values.
impl Add for Price {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Price(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Price {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Price values.
impl Sub for Price {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Price(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Price {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<u32> for Price {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Price(self.0 * qty as f64)
    }
}

/// Summation over line totals.
impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::zero(), |acc, p| acc + p)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_amount() {
        let price = Price::new(24.99);
        assert_eq!(price.amount(), 24.99);
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(format!("{}", Price::new(24.8917)), "$24.89");
        assert_eq!(format!("{}", Price::new(5.0)), "$5.00");
        assert_eq!(format!("{}", Price::new(-5.5)), "-$5.50");
        assert_eq!(format!("{}", Price::new(0.0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Price::new(10.0);
        let b = Price::new(5.0);

        assert!((a + b).approx_eq(Price::new(15.0)));
        assert!((a - b).approx_eq(Price::new(5.0)));
        let result: Price = a * 3;
        assert!(result.approx_eq(Price::new(30.0)));
    }

    #[test]
    fn test_assign_ops() {
        let mut total = Price::zero();
        total += Price::new(24.99);
        total += Price::new(24.99);
        total -= Price::new(10.0);
        assert!(total.approx_eq(Price::new(39.98)));
    }

    #[test]
    fn test_discount() {
        // The catalog's flagship case: 29.99 at 17% off = 24.8917 exactly
        let discounted = Price::new(29.99).apply_discount(17);
        assert!(discounted.approx_eq(Price::new(24.8917)));
        assert_eq!(discounted.to_string(), "$24.89");

        // 0% and 100% bounds
        assert!(Price::new(10.0).apply_discount(0).approx_eq(Price::new(10.0)));
        assert!(Price::new(10.0).apply_discount(100).is_zero());
    }

    #[test]
    fn test_storage_keeps_precision() {
        // The stored value keeps the sub-cent tail; only Display rounds.
        let line = Price::new(29.99).apply_discount(17).multiply_quantity(2);
        assert!(line.approx_eq(Price::new(49.7834)));
        assert_eq!(line.rounded(), 49.78);
        assert_eq!(line.to_string(), "$49.78");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(1.5), Price::new(2.25), Price::new(0.25)]
            .into_iter()
            .sum();
        assert!(total.approx_eq(Price::new(4.0)));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Price::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        assert!(!Price::new(0.01).is_zero());
        assert!(Price::new(-0.01).is_negative());

        // 0.1 + 0.2 is zero-distance from 0.3 under the tolerance
        assert!((Price::new(0.1) + Price::new(0.2)).approx_eq(Price::new(0.3)));
    }
}
