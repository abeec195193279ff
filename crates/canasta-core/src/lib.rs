//! # canasta-core: Pure Business Logic for Canasta
//!
//! This crate is the **heart** of Canasta. It contains the cart and pricing
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Canasta Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront (terminal app)                      │   │
//! │  │    catalog view ──► cart view ──► coupon/shipping ──► checkout  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 canasta-store (persistence layer)               │   │
//! │  │    CartStore: mutate ──► persist snapshot ──► report status     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ canasta-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  pricing  │  │  catalog  │  │   │
//! │  │   │   Money   │  │   Cart    │  │  Coupon   │  │  Catalog  │  │   │
//! │  │   │  TaxRate  │  │ LineItem  │  │ compute() │  │  Product  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - TaxRate and Product
//! - [`catalog`] - Product catalog lookups and the built-in base catalog
//! - [`cart`] - LineItem and Cart mutation rules
//! - [`pricing`] - Coupons and the subtotal → discount → shipping → total math
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Persistence, network, and terminal access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use canasta_core::money::Money;
//! use canasta_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let net = Money::from_cents(10_000); // $100.00 before tax
//!
//! // Gross up by the fixed 21% tax
//! let gross = net.with_tax(TaxRate::from_bps(canasta_core::IVA_BPS));
//! assert_eq!(gross.cents(), 12_100); // $121.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use canasta_core::Money` instead of
// `use canasta_core::money::Money`

pub use cart::{Cart, LineItem};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{Coupon, PricingResult};
pub use types::{Product, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The fixed tax adjustment applied to every base catalog price, in basis
/// points. 2100 bps = 21%, i.e. the ×1.21 multiplier on pre-tax prices.
///
/// ## Why a constant?
/// Catalog prices are tax-adjusted exactly once, at load time. The rest of
/// the system only ever sees gross prices, so a single shared rate keeps the
/// base catalog and the remote feed normalization in agreement.
pub const IVA_BPS: u32 = 2100;

/// Maximum length accepted for a product name, in characters.
///
/// Protects the cart and the persisted snapshot from absurd feed entries.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// It also keeps line totals far below i64 range, so subtotal arithmetic
/// can stay plain integer math.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price, in cents ($10,000,000.00).
///
/// Nothing in the base catalog comes close; the bound exists so a junk
/// feed entry or a doctored snapshot cannot push tax and line-total
/// arithmetic out of i64 range.
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000;
