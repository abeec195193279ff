//! # Catalog Module
//!
//! The product catalog the storefront offers for sale.
//!
//! A catalog starts from [`Catalog::base`], the fixed built-in list with
//! tax-adjusted prices. When a remote feed refresh succeeds, the caller
//! builds a new `Catalog` from the validated entries and swaps it in
//! wholesale; a failed refresh leaves the previous catalog untouched.
//!
//! ## Usage
//! ```rust
//! use canasta_core::catalog::Catalog;
//!
//! let catalog = Catalog::base();
//! let pan = catalog.find("pan").unwrap();
//! assert_eq!(pan.unit_price.cents(), 12_100);
//! ```

use crate::money::Money;
use crate::types::{Product, TaxRate};
use crate::IVA_BPS;

/// The fixed base product list, as (name, pre-tax cents) pairs.
const BASE_PRODUCTS: &[(&str, i64)] = &[
    ("Pan", 10_000),
    ("Leche", 20_000),
    ("Queso", 30_000),
    ("Carne", 50_000),
    ("Verduras", 15_000),
    ("Frutas", 25_000),
];

/// An ordered collection of products.
///
/// Order is display order; `find` is the exact-match lookup used when
/// adding to the cart and `filter` backs the incremental search box.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from an already-validated product list.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Builds the fixed base catalog.
    ///
    /// Prices are stored pre-tax and grossed up by the fixed IVA rate here,
    /// so the base list and feed entries go through the identical adjustment.
    pub fn base() -> Self {
        let rate = TaxRate::from_bps(IVA_BPS);
        let products = BASE_PRODUCTS
            .iter()
            .map(|&(name, net_cents)| Product::from_net(name, Money::from_cents(net_cents), rate))
            .collect();
        Catalog { products }
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Product at a display position, if any.
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Exact product lookup by name, case-insensitive.
    ///
    /// The query is trimmed first; `"  pan "` finds `"Pan"`. Substring
    /// matches do NOT count here, that is what [`Catalog::filter`] is for.
    pub fn find(&self, name: &str) -> Option<&Product> {
        let needle = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.to_lowercase() == needle)
    }

    /// Case-insensitive substring filter for incremental search.
    ///
    /// An empty (or all-whitespace) query yields no matches rather than the
    /// whole catalog, so a cleared search box shows a blank result list.
    pub fn filter(&self, text: &str) -> Vec<&Product> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }
}
