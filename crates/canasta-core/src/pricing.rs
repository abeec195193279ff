//! # Pricing Engine
//!
//! Pure derivation of cart totals. Nothing here is persisted and nothing
//! here mutates: callers recompute the whole block on every render.
//!
//! ## Derivation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Totals Derivation                                │
//! │                                                                         │
//! │  Cart lines                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  subtotal = Σ unit price × quantity                                     │
//! │      │                                                                  │
//! │      ├──────► discount = coupon % of subtotal,                          │
//! │      │                   rounded to the nearest whole unit (half-up)    │
//! │      │                                                                  │
//! │      ├──────► shipping = selected surcharge (none selected = 0)         │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  total = max(0, subtotal + shipping − discount)                         │
//! │                                                                         │
//! │  The discount applies to the subtotal only; shipping is never           │
//! │  discounted. The clamp keeps an oversized discount from producing       │
//! │  a negative amount due.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use crate::money::Money;

// =============================================================================
// Coupon
// =============================================================================

/// The accepted coupon codes.
///
/// Codes are normalized (trimmed, uppercased) at parse time, so
/// `" descuento10 "` and `"DESCUENTO10"` are the same coupon. The canonical
/// uppercase code is what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupon {
    /// `DESCUENTO10`: 10% off the subtotal.
    Descuento10,
    /// `DESCUENTO20`: 20% off the subtotal.
    Descuento20,
}

impl Coupon {
    /// Parses a user-entered code, normalizing first.
    ///
    /// Returns `None` for anything outside the accepted set.
    pub fn parse(code: &str) -> Option<Coupon> {
        match code.trim().to_uppercase().as_str() {
            "DESCUENTO10" => Some(Coupon::Descuento10),
            "DESCUENTO20" => Some(Coupon::Descuento20),
            _ => None,
        }
    }

    /// The canonical code string, as persisted.
    pub const fn code(&self) -> &'static str {
        match self {
            Coupon::Descuento10 => "DESCUENTO10",
            Coupon::Descuento20 => "DESCUENTO20",
        }
    }

    /// The discount rate in basis points.
    pub const fn discount_bps(&self) -> u32 {
        match self {
            Coupon::Descuento10 => 1000,
            Coupon::Descuento20 => 2000,
        }
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Pricing Functions
// =============================================================================

/// Resolves the shipping surcharge for the current selection.
///
/// No selection means no surcharge, and a negative selection (which no
/// shipping menu should produce) is treated as zero rather than becoming
/// a hidden rebate.
pub fn shipping_cost(selection: Option<Money>) -> Money {
    match selection {
        Some(cost) if cost.is_positive() => cost,
        _ => Money::zero(),
    }
}

/// Computes the coupon discount for a subtotal.
///
/// A valid coupon grants its percentage of the subtotal rounded to the
/// nearest whole currency unit, half-up: 10% of $242.00 is $24, not
/// $24.20. No coupon means no discount.
pub fn discount(subtotal: Money, coupon: Option<Coupon>) -> Money {
    match coupon {
        Some(coupon) => subtotal.percent(coupon.discount_bps()).round_to_major(),
        None => Money::zero(),
    }
}

/// Combines the pieces into the amount due.
///
/// Clamped at zero: a discount larger than subtotal + shipping produces a
/// free order, never a credit.
pub fn total(subtotal: Money, shipping: Money, discount: Money) -> Money {
    (subtotal + shipping - discount).max(Money::zero())
}

// =============================================================================
// Pricing Result
// =============================================================================

/// The fully derived totals block, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingResult {
    pub subtotal: Money,
    pub shipping: Money,
    pub discount: Money,
    pub total: Money,
}

impl PricingResult {
    /// Derives all totals from a subtotal, the active coupon, and the
    /// shipping selection.
    pub fn compute(
        subtotal: Money,
        coupon: Option<Coupon>,
        shipping_selection: Option<Money>,
    ) -> Self {
        let shipping = shipping_cost(shipping_selection);
        let discount = discount(subtotal, coupon);
        PricingResult {
            subtotal,
            shipping,
            discount,
            total: total(subtotal, shipping, discount),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
