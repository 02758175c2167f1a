//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Custom-size pricing multiplies areas by rates:                         │
//! │    π × 1² × 100 = 314.1592653589793  → not a price anyone can pay      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents internally, decimals on the wire           │
//! │    314.159… → 31416 cents → "314.16" in JSON                            │
//! │    Rounding happens exactly once, at the boundary                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storefront backend speaks decimal major units (`"price": 1299.5`), so
//! `Money` serializes to and from a JSON number in major units while keeping
//! `i64` cents in memory.
//!
//! ## Usage
//! ```rust
//! use woodnest_core::money::Money;
//!
//! let price = Money::from_cents(129_950); // 1299.50
//! let doubled = price * 2;
//! assert_eq!(doubled.cents(), 259_900);
//!
//! let computed = Money::from_major(314.159_265);
//! assert_eq!(computed.cents(), 31_416);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents/paise).
///
/// ## Where Money is Used
/// ```text
/// Catalog: Product.price, SizeVariant.price, CustomSizeConfig.minimum_charge
///      │
///      ▼
/// pricing::calculate_price ──► CustomSize.calculated_price
///      │
///      ▼
/// AddToCartRequest (JSON number) ──► backend cart ──► CartLine.unit_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// Rounds half away from zero to the nearest cent. NaN and infinities
    /// become zero; values beyond the `i64` range saturate.
    ///
    /// ```rust
    /// use woodnest_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(600.0).cents(), 60_000);
    /// assert_eq!(Money::from_major(0.005).cents(), 1);
    /// assert_eq!(Money::from_major(f64::NAN).cents(), 0);
    /// ```
    pub fn from_major(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        // `as` saturates on overflow
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units, for the wire and for display math.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative amounts to zero.
    ///
    /// Catalog data is not trusted to be non-negative; pricing floors every
    /// configured amount through this.
    #[inline]
    pub const fn non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use woodnest_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(49_900);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 149_700);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display for logs and the `quote` binary. Currency symbols are the UI's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

// =============================================================================
// Wire Format (decimal major units)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_major(amount))
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
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_rounds_to_cent() {
        assert_eq!(Money::from_major(314.159_265_358_979_3).cents(), 31_416);
        assert_eq!(Money::from_major(12.344).cents(), 1234);
        assert_eq!(Money::from_major(-5.5).cents(), -550);
    }

    #[test]
    fn test_from_major_non_finite_is_zero() {
        assert!(Money::from_major(f64::NAN).is_zero());
        assert!(Money::from_major(f64::INFINITY).is_zero());
        assert!(Money::from_major(f64::NEG_INFINITY).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(60_000).to_string(), "600.00");
        assert_eq!(Money::from_cents(31_416).to_string(), "314.16");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);

        let capped: Money = [Money::from_cents(i64::MAX), a].into_iter().sum();
        assert_eq!(capped.cents(), i64::MAX);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(Money::from_cents(-1).non_negative(), Money::zero());
        assert_eq!(Money::from_cents(42).non_negative().cents(), 42);
    }

    #[test]
    fn test_wire_format_is_major_units() {
        let json = serde_json::to_string(&Money::from_cents(129_950)).unwrap();
        assert_eq!(json, "1299.5");

        let parsed: Money = serde_json::from_str("500").unwrap();
        assert_eq!(parsed.cents(), 50_000);

        let parsed: Money = serde_json::from_str("314.16").unwrap();
        assert_eq!(parsed.cents(), 31_416);
    }
}
