//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart that sums line totals in floats drifts away from the           │
//! │  persisted snapshot it was restored from.                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    $121.00 is 12100 cents. Sums, discounts, and totals stay exact.     │
//! │    Floats appear in exactly one place: the persisted wire format,      │
//! │    which stores prices in major units (see [`major_units`]).           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use canasta_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(12_100); // $121.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // $242.00
//! let total = price + Money::from_cents(500);     // $126.00
//! # assert_eq!(doubled.cents(), 24_200);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results of `subtotal − discount` style
///   math may dip negative before clamping
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support (serializes as bare cents); the
///   persisted snapshot uses [`major_units`] instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use canasta_core::money::Money;
    ///
    /// let price = Money::from_cents(12_100); // Represents $121.00
    /// assert_eq!(price.cents(), 12_100);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use canasta_core::money::Money;
    ///
    /// let price = Money::from_major_minor(181, 50); // $181.50
    /// assert_eq!(price.cents(), 18_150);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use canasta_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(18_150).major_units(), 181);
    /// assert_eq!(Money::from_cents(-550).major_units(), -5);
    /// ```
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_units(&self) -> i64 {
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates a percentage of this amount, given in basis points,
    /// rounded half-up at the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides
    /// the half-up rounding (5000/10000 = half a cent). i128 intermediate
    /// prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use canasta_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(24_200); // $242.00
    /// assert_eq!(subtotal.percent(1000).cents(), 2_420); // 10% = $24.20
    ///
    /// // Half-cent boundary rounds up: 21% of $0.50 is 10.5 cents → 11
    /// assert_eq!(Money::from_cents(50).percent(2100).cents(), 11);
    /// ```
    pub fn percent(&self, bps: u32) -> Money {
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Grosses up a net amount by a tax rate, rounding half-up at the cent.
    ///
    /// This is how the base catalog turns pre-tax prices into the prices the
    /// cart actually sees.
    ///
    /// ## Example
    /// ```rust
    /// use canasta_core::money::Money;
    /// use canasta_core::types::TaxRate;
    ///
    /// let net = Money::from_cents(15_000);      // $150.00
    /// let iva = TaxRate::from_bps(2100);        // 21%
    /// assert_eq!(net.with_tax(iva).cents(), 18_150); // $181.50
    /// ```
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        *self + self.percent(rate.bps())
    }

    /// Rounds to the nearest whole major unit, half-up (away from zero).
    ///
    /// Used for coupon discounts, which are granted in whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use canasta_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2_420).round_to_major().cents(), 2_400); // $24.20 → $24
    /// assert_eq!(Money::from_cents(2_450).round_to_major().cents(), 2_500); // $24.50 → $25
    /// ```
    pub const fn round_to_major(&self) -> Money {
        let sign = if self.0 < 0 { -1 } else { 1 };
        let magnitude = self.0.abs();
        Money(sign * ((magnitude + 50) / 100) * 100)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. The storefront formats currency
/// for display through its configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.major_units().abs(),
            self.minor_units()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde helper: (de)serializes `Money` as a number in major units.
///
/// The persisted snapshot stores prices the way the original storage format
/// does: `"precio": 121` or `"precio": 181.5`, a plain JSON number of major
/// currency units. This module is the ONLY place where money touches floats;
/// conversion back to cents rounds half-away-from-zero, matching standard
/// currency rounding.
///
/// ## Usage
/// ```rust,ignore
/// #[serde(rename = "precio", with = "canasta_core::money::major_units")]
/// pub unit_price: Money,
/// ```
pub mod major_units {
    use super::Money;
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.cents() as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(D::Error::custom("price must be a finite number"));
        }
        // f64::round is half-away-from-zero
        Ok(Money::from_cents((value * 100.0).round() as i64))
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
        let money = Money::from_cents(18_150);
        assert_eq!(money.cents(), 18_150);
        assert_eq!(money.major_units(), 181);
        assert_eq!(money.minor_units(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(121, 0);
        assert_eq!(money.cents(), 12_100);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(12_100)), "$121.00");
        assert_eq!(format!("{}", Money::from_cents(18_150)), "$181.50");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_with_tax_exact() {
        // $100.00 at 21% = $121.00, no rounding involved
        let net = Money::from_cents(10_000);
        assert_eq!(net.with_tax(TaxRate::from_bps(2100)).cents(), 12_100);

        // $150.00 at 21% = $181.50
        let net = Money::from_cents(15_000);
        assert_eq!(net.with_tax(TaxRate::from_bps(2100)).cents(), 18_150);
    }

    #[test]
    fn test_percent_rounds_half_up_at_cent() {
        // 21% of $0.50 is 10.5 cents → 11 (half-up)
        assert_eq!(Money::from_cents(50).percent(2100).cents(), 11);
        // 21% of $99.99 is 2099.79 cents → 2100
        assert_eq!(Money::from_cents(9_999).percent(2100).cents(), 2_100);
        // 10% of $242.00 is exactly $24.20
        assert_eq!(Money::from_cents(24_200).percent(1000).cents(), 2_420);
    }

    #[test]
    fn test_round_to_major() {
        assert_eq!(Money::from_cents(2_420).round_to_major().cents(), 2_400);
        assert_eq!(Money::from_cents(2_449).round_to_major().cents(), 2_400);
        assert_eq!(Money::from_cents(2_450).round_to_major().cents(), 2_500);
        assert_eq!(Money::from_cents(0).round_to_major().cents(), 0);
        assert_eq!(Money::from_cents(-150).round_to_major().cents(), -200);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    #[test]
    fn test_major_units_wire_format() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wire {
            #[serde(with = "super::major_units")]
            precio: Money,
        }

        let json = serde_json::to_string(&Wire {
            precio: Money::from_cents(18_150),
        })
        .unwrap();
        assert_eq!(json, r#"{"precio":181.5}"#);

        let back: Wire = serde_json::from_str(r#"{"precio":121}"#).unwrap();
        assert_eq!(back.precio.cents(), 12_100);

        // Values that are not representable exactly in binary still land on
        // the right cent
        let back: Wire = serde_json::from_str(r#"{"precio":302.5}"#).unwrap();
        assert_eq!(back.precio.cents(), 30_250);
    }

    #[test]
    fn test_major_units_rejects_non_finite() {
        #[derive(serde::Deserialize)]
        struct Wire {
            #[serde(with = "super::major_units")]
            #[allow(dead_code)]
            precio: Money,
        }

        // JSON has no NaN literal, but a non-number must fail cleanly
        assert!(serde_json::from_str::<Wire>(r#"{"precio":"gratis"}"#).is_err());
    }
}
