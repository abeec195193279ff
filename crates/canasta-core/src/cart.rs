//! # Cart Module
//!
//! The in-memory shopping cart and its pure mutation rules.
//!
//! Persistence lives in canasta-store; this module only decides WHAT a
//! mutation does to the line list. Every rule here is synchronous and
//! either applies fully or rejects with the cart untouched.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Intent               Cart Operation          Line List Change     │
//! │  ───────────               ──────────────          ────────────────     │
//! │                                                                         │
//! │  Add product ────────────► add_or_increment() ───► find-or-push         │
//! │                                                                         │
//! │  Bump a line up ─────────► increment(i) ─────────► items[i].qty += 1    │
//! │                                                    (caps at 999)        │
//! │  Bump a line down ───────► decrement(i) ─────────► items[i].qty -= 1    │
//! │                                                    (floors at 1)        │
//! │                                                                         │
//! │  Type a quantity ────────► set_quantity(i, n) ───► items[i].qty = n     │
//! │                                                    (clamped to 1..=999) │
//! │                                                                         │
//! │  Remove a line ──────────► remove(i) ────────────► items.remove(i)      │
//! │                                                    (indices shift!)     │
//! │                                                                         │
//! │  Empty the cart ─────────► clear() ──────────────► items.clear()        │
//! │                                                                         │
//! │  NOTE: Lines are addressed by display index (0-based here; the          │
//! │        storefront shows 1-based positions). remove() shifts every       │
//! │        later index down by one, so indices must not be cached across    │
//! │        a removal.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_product_name, validate_quantity, validate_unit_price};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Line Item
// =============================================================================

/// One line of the cart: a product name, a frozen unit price, a quantity.
///
/// ## Design Notes
/// - `unit_price` is a snapshot taken when the line was created. A catalog
///   refresh that reprices the product never touches existing lines.
/// - Serde renames pin the persisted wire shape:
///   `{"nombre": "Pan", "precio": 121, "cantidad": 2}` with `precio` in
///   major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name at time of adding (frozen), also the line identity.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Unit price at time of adding (frozen).
    #[serde(rename = "precio", with = "crate::money::major_units")]
    pub unit_price: Money,

    /// Quantity in cart, always >= 1.
    #[serde(rename = "cantidad")]
    pub quantity: i64,
}

impl LineItem {
    /// Creates a new cart line from a product and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the catalog later serves a
    /// different price for the same name, this line keeps the original.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Checks the cart invariants on a line that arrived from outside
    /// (a restored snapshot rather than a validated mutation).
    pub fn check(&self) -> Result<(), ValidationError> {
        validate_product_name(&self.name)?;
        validate_unit_price(self.unit_price)?;
        validate_quantity(self.quantity)?;
        Ok(())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by exact name (adding the same product increments
///   its quantity instead of appending a duplicate)
/// - Quantity is always within 1..=[`MAX_ITEM_QUANTITY`] (decrement floors
///   at 1, increment and set_quantity stop at the cap, adds past the cap
///   are rejected)
/// - Vec order is display order; new lines append at the end
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from restored lines.
    ///
    /// Callers are expected to have run [`LineItem::check`] on every line;
    /// the store treats any failing line as a malformed snapshot.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Cart { items }
    }

    /// Adds a product to the cart, or increments its line if one exists.
    ///
    /// ## Behavior
    /// - Quantity outside 1..=[`MAX_ITEM_QUANTITY`] is rejected outright and
    ///   nothing changes; the same bound applies to the incremented sum
    /// - Line match is by exact name (case-sensitive, unlike catalog search)
    /// - On a match the quantity grows and the frozen price stays, even if
    ///   the product passed in carries a newer price
    /// - Otherwise a new line is appended at the end
    pub fn add_or_increment(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_product_name(&product.name)?;
        validate_unit_price(product.unit_price)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.name == product.name) {
            let new_quantity = item.quantity + quantity;
            validate_quantity(new_quantity)?;
            item.quantity = new_quantity;
            return Ok(());
        }

        self.items.push(LineItem::from_product(product, quantity));
        Ok(())
    }

    /// Increases a line's quantity by one, capping at [`MAX_ITEM_QUANTITY`].
    ///
    /// At the cap this is a silent no-op, mirroring how [`Cart::decrement`]
    /// floors at 1.
    pub fn increment(&mut self, index: usize) -> CoreResult<()> {
        let item = self.line_mut(index)?;
        if item.quantity < MAX_ITEM_QUANTITY {
            item.quantity += 1;
        }
        Ok(())
    }

    /// Decreases a line's quantity by one, flooring at 1.
    ///
    /// Decrementing a quantity-1 line is a silent no-op; the line is never
    /// removed this way. Explicit removal is [`Cart::remove`].
    pub fn decrement(&mut self, index: usize) -> CoreResult<()> {
        let item = self.line_mut(index)?;
        if item.quantity > 1 {
            item.quantity -= 1;
        }
        Ok(())
    }

    /// Sets a line's quantity directly, clamping into
    /// 1..=[`MAX_ITEM_QUANTITY`].
    ///
    /// Unlike `add_or_increment` this never rejects a value. A zero typed
    /// into the quantity field means "at least one", not "remove", and an
    /// absurdly large one means the cap.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        let item = self.line_mut(index)?;
        item.quantity = quantity.clamp(1, MAX_ITEM_QUANTITY);
        Ok(())
    }

    /// Removes a line, returning it.
    ///
    /// Every line after `index` shifts down by one position.
    pub fn remove(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.items.len() {
            return Err(CoreError::LineNotFound { index });
        }
        Ok(self.items.remove(index))
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Line at a display position, if any.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Returns the number of lines (unique products) in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal: Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        self.items
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pan() -> Product {
        Product::new("Pan", Money::from_cents(12_100))
    }

    fn leche() -> Product {
        Product::new("Leche", Money::from_cents(24_200))
    }

    #[test]
    fn test_add_creates_line_with_frozen_price() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_cents(24_200));
    }

    #[test]
    fn test_add_same_product_increments_single_line() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 2).unwrap();
        cart.add_or_increment(&pan(), 3).unwrap();

        assert_eq!(cart.line_count(), 1); // Still one line
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_repriced_product_keeps_frozen_price() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 1).unwrap();

        // Same name, new price: the line increments but keeps the snapshot
        let repriced = Product::new("Pan", Money::from_cents(99_900));
        cart.add_or_increment(&repriced, 1).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].unit_price, Money::from_cents(12_100));
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();

        assert!(cart.add_or_increment(&pan(), 0).is_err());
        assert!(cart.add_or_increment(&pan(), -3).is_err());
        assert!(cart.is_empty()); // Nothing changed
    }

    #[test]
    fn test_add_rejects_quantity_above_cap() {
        let mut cart = Cart::new();

        assert!(cart.add_or_increment(&pan(), MAX_ITEM_QUANTITY + 1).is_err());
        assert!(cart.add_or_increment(&pan(), i64::MAX).is_err());
        assert!(cart.is_empty());

        // At the cap exactly is fine
        cart.add_or_increment(&pan(), MAX_ITEM_QUANTITY).unwrap();
        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_repeated_add_cannot_exceed_cap() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), MAX_ITEM_QUANTITY - 1).unwrap();

        // The sum would pass the cap: rejected, line untouched
        assert!(cart.add_or_increment(&pan(), 2).is_err());
        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY - 1);

        // Topping up exactly to the cap still works, and a further add of a
        // cap-sized quantity is rejected rather than wrapping around
        cart.add_or_increment(&pan(), 1).unwrap();
        assert!(cart.add_or_increment(&pan(), MAX_ITEM_QUANTITY).is_err());
        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_line_identity_is_case_sensitive() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 1).unwrap();
        cart.add_or_increment(&Product::new("pan", Money::from_cents(12_100)), 1)
            .unwrap();

        // Catalog lookup is case-insensitive, line identity is not
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 1).unwrap();

        cart.increment(0).unwrap();
        assert_eq!(cart.items()[0].quantity, 2);

        cart.decrement(0).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 1).unwrap();

        cart.decrement(0).unwrap(); // Already at 1: silent no-op
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.line_count(), 1); // Line never removed by decrement
    }

    #[test]
    fn test_increment_caps_at_max_quantity() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), MAX_ITEM_QUANTITY).unwrap();

        cart.increment(0).unwrap(); // Already at the cap: silent no-op
        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY);

        // Subtotal stays well inside i64 even at the cap
        assert_eq!(cart.subtotal(), Money::from_cents(12_100 * MAX_ITEM_QUANTITY));
    }

    #[test]
    fn test_set_quantity_clamps_below_one() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 5).unwrap();

        cart.set_quantity(0, 3).unwrap();
        assert_eq!(cart.items()[0].quantity, 3);

        cart.set_quantity(0, 0).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);

        cart.set_quantity(0, -7).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_clamps_above_cap() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 1).unwrap();

        cart.set_quantity(0, MAX_ITEM_QUANTITY + 1).unwrap();
        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY);

        cart.set_quantity(0, i64::MAX).unwrap();
        assert_eq!(cart.items()[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 1).unwrap();

        assert!(matches!(
            cart.increment(1),
            Err(CoreError::LineNotFound { index: 1 })
        ));
        assert!(cart.decrement(5).is_err());
        assert!(cart.set_quantity(9, 2).is_err());
        assert!(cart.remove(1).is_err());
    }

    #[test]
    fn test_remove_shifts_later_indices_down() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 1).unwrap();
        cart.add_or_increment(&leche(), 1).unwrap();

        let removed = cart.remove(0).unwrap();
        assert_eq!(removed.name, "Pan");

        // Leche moved from index 1 to index 0
        assert_eq!(cart.items()[0].name, "Leche");
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 2).unwrap(); // 24_200
        cart.add_or_increment(&leche(), 1).unwrap(); // 24_200

        assert_eq!(cart.subtotal(), Money::from_cents(48_400));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_wire_shape() {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), 2).unwrap();

        let json = serde_json::to_string(cart.items()).unwrap();
        assert_eq!(json, r#"[{"nombre":"Pan","precio":121.0,"cantidad":2}]"#);

        let restored: Vec<LineItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart.items());
    }

    #[test]
    fn test_line_check_catches_bad_restored_data() {
        let ok = LineItem {
            name: "Pan".into(),
            unit_price: Money::from_cents(12_100),
            quantity: 2,
        };
        assert!(ok.check().is_ok());

        let zero_qty = LineItem {
            quantity: 0,
            ..ok.clone()
        };
        assert!(zero_qty.check().is_err());

        let absurd_qty = LineItem {
            quantity: i64::MAX,
            ..ok.clone()
        };
        assert!(absurd_qty.check().is_err());

        let absurd_price = LineItem {
            unit_price: Money::from_cents(i64::MAX),
            ..ok.clone()
        };
        assert!(absurd_price.check().is_err());

        let negative_price = LineItem {
            unit_price: Money::from_cents(-1),
            ..ok.clone()
        };
        assert!(negative_price.check().is_err());

        let blank_name = LineItem {
            name: "  ".into(),
            ..ok
        };
        assert!(blank_name.check().is_err());
    }
}
