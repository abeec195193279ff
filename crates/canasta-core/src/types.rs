//! # Domain Types
//!
//! Core domain types shared across the workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │     Coupon      │       │
//! │  │  ─────────────  │   │  (cart module)  │   │ (pricing module)│       │
//! │  │  name           │   │  name           │   │  Descuento10    │       │
//! │  │  unit_price     │   │  unit_price     │   │  Descuento20    │       │
//! │  └─────────────────┘   │  quantity       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐                                                    │
//! │  │    TaxRate      │   A Product is what the catalog offers; a         │
//! │  │  ─────────────  │   LineItem is what the cart holds. The line       │
//! │  │  bps (u32)      │   freezes the product's price at add time.        │
//! │  │  2100 = 21%     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21% (the fixed IVA rate, [`crate::IVA_BPS`])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
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

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product offered by the catalog.
///
/// `unit_price` is the price the customer pays: already tax-adjusted.
/// Products are immutable once built; a catalog refresh replaces the whole
/// collection rather than editing entries in place.
///
/// No serde here on purpose. Products never cross a wire; the persisted cart
/// and the remote feed each have their own wire types in canasta-store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Display name, also the lookup key within a catalog.
    pub name: String,

    /// Customer-facing price (tax already applied).
    pub unit_price: Money,
}

impl Product {
    /// Creates a product from a ready, tax-adjusted price.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Product {
            name: name.into(),
            unit_price,
        }
    }

    /// Creates a product from a pre-tax price, grossing it up by `rate`.
    ///
    /// Both the fixed base list and validated feed entries go through this
    /// constructor so every price in the system carries the same adjustment.
    ///
    /// ## Example
    /// ```rust
    /// use canasta_core::money::Money;
    /// use canasta_core::types::{Product, TaxRate};
    ///
    /// let pan = Product::from_net("Pan", Money::from_cents(10_000), TaxRate::from_bps(2100));
    /// assert_eq!(pan.unit_price.cents(), 12_100);
    /// ```
    pub fn from_net(name: impl Into<String>, net_price: Money, rate: TaxRate) -> Self {
        Product {
            name: name.into(),
            unit_price: net_price.with_tax(rate),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate() {
        let rate = TaxRate::from_bps(2100);
        assert_eq!(rate.bps(), 2100);
        assert_eq!(rate.percentage(), 21.0);
        assert!(!rate.is_zero());
        assert!(TaxRate::zero().is_zero());
        assert_eq!(TaxRate::default(), TaxRate::zero());
    }

    #[test]
    fn test_product_from_net_applies_tax() {
        let rate = TaxRate::from_bps(2100);

        let pan = Product::from_net("Pan", Money::from_cents(10_000), rate);
        assert_eq!(pan.unit_price, Money::from_cents(12_100));

        let verduras = Product::from_net("Verduras", Money::from_cents(15_000), rate);
        assert_eq!(verduras.unit_price, Money::from_cents(18_150));
    }

    #[test]
    fn test_product_new_takes_price_verbatim() {
        let p = Product::new("Frutas", Money::from_cents(30_250));
        assert_eq!(p.name, "Frutas");
        assert_eq!(p.unit_price.cents(), 30_250);
    }
}
