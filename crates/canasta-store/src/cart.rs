//! # Cart Store
//!
//! Wraps the pure [`Cart`] with persistence so that every mutation that
//! succeeds is on disk before the caller sees `Ok`.
//!
//! ## Persist-After-Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore Operation Cycle                          │
//! │                                                                         │
//! │  Intent ──► domain rule check ──► in-memory mutation ──► persist        │
//! │                    │                                        │           │
//! │                    │ rejected                               │ I/O fails │
//! │                    ▼                                        ▼           │
//! │             Err, nothing changed              Err, memory keeps the     │
//! │             (cart and disk untouched)         mutation; the previous    │
//! │                                               snapshot stays on disk    │
//! │                                               as the durable fallback   │
//! │                                                                         │
//! │  The full line list is serialized each time, overwriting the previous   │
//! │  snapshot under "carrito". clear() is the exception: it REMOVES the     │
//! │  key instead of writing an empty array.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Restore Rules
//! A snapshot restores only if it parses AND every line passes the cart
//! invariants (name present, price non-negative, quantity >= 1). Anything
//! else degrades to an empty cart with a warning; startup never panics on
//! stale bytes. A persisted coupon code that is no longer recognized is
//! removed rather than silently reapplied.

use canasta_core::{Cart, CoreError, Coupon, LineItem, Money, PricingResult, Product};
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::kv::StringStore;
use crate::{CART_KEY, COUPON_KEY};

/// A cart plus the backing store it persists into.
///
/// Owns both exclusively; the storefront session holds one of these for its
/// whole life, so mutations are naturally one-at-a-time.
#[derive(Debug)]
pub struct CartStore<S: StringStore> {
    store: S,
    cart: Cart,
    coupon: Option<Coupon>,
}

impl<S: StringStore> CartStore<S> {
    /// Opens the store, restoring the persisted cart and coupon.
    ///
    /// ## Degradation
    /// - Absent snapshot: empty cart
    /// - Unparseable or invariant-breaking snapshot: empty cart, warn
    /// - Unknown persisted coupon: cleared from the store, warn
    ///
    /// I/O failures reading the backing store DO propagate; not being able
    /// to reach the store at all is different from finding junk in it.
    pub fn open(mut store: S) -> StoreResult<Self> {
        let cart = match store.get(CART_KEY)? {
            None => Cart::new(),
            Some(raw) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) if items.iter().all(|i| i.check().is_ok()) => {
                    debug!(lines = items.len(), "Cart snapshot restored");
                    Cart::from_items(items)
                }
                Ok(_) => {
                    warn!("Cart snapshot breaks cart invariants; starting empty");
                    Cart::new()
                }
                Err(e) => {
                    warn!(error = %e, "Cart snapshot is not valid JSON; starting empty");
                    Cart::new()
                }
            },
        };

        let coupon = match store.get(COUPON_KEY)? {
            None => None,
            Some(raw) => match Coupon::parse(&raw) {
                Some(coupon) => {
                    debug!(code = coupon.code(), "Coupon restored");
                    Some(coupon)
                }
                None => {
                    warn!(code = %raw, "Persisted coupon no longer recognized; clearing");
                    store.remove(COUPON_KEY)?;
                    None
                }
            },
        };

        Ok(CartStore {
            store,
            cart,
            coupon,
        })
    }

    // =========================================================================
    // Cart Mutations (each one persists)
    // =========================================================================

    /// Adds a product to the cart or increments its existing line,
    /// then persists the snapshot.
    pub fn add_or_increment(&mut self, product: &Product, quantity: i64) -> StoreResult<()> {
        self.cart.add_or_increment(product, quantity)?;
        info!(product = %product.name, quantity, "Added to cart");
        self.persist()
    }

    /// Increments a line's quantity by one, then persists.
    pub fn increment(&mut self, index: usize) -> StoreResult<()> {
        self.cart.increment(index)?;
        self.persist()
    }

    /// Decrements a line's quantity by one (flooring at 1), then persists.
    pub fn decrement(&mut self, index: usize) -> StoreResult<()> {
        self.cart.decrement(index)?;
        self.persist()
    }

    /// Sets a line's quantity (values below 1 clamp to 1), then persists.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> StoreResult<()> {
        self.cart.set_quantity(index, quantity)?;
        self.persist()
    }

    /// Removes a line, persists, and returns the removed line.
    pub fn remove(&mut self, index: usize) -> StoreResult<LineItem> {
        let removed = self.cart.remove(index)?;
        info!(product = %removed.name, "Removed from cart");
        self.persist()?;
        Ok(removed)
    }

    /// Empties the cart and removes the persisted key entirely.
    ///
    /// The absent key, not an empty array, is the canonical "no cart"
    /// state. Used by the clear intent and after a confirmed checkout.
    /// The active coupon is NOT touched; clearing the basket does not
    /// forfeit the code the user typed in.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.cart.clear();
        self.store.remove(CART_KEY)?;
        info!("Cart cleared");
        Ok(())
    }

    // =========================================================================
    // Coupon
    // =========================================================================

    /// Applies a coupon code.
    ///
    /// ## Behavior
    /// - Recognized code: persisted in canonical uppercase form under
    ///   "cuponAplicado", becomes the active coupon
    /// - Unrecognized code: any previously active coupon is dropped and
    ///   its key removed, then the rejection is reported
    ///
    /// Either way the caller should re-render totals afterwards.
    pub fn apply_coupon(&mut self, code: &str) -> StoreResult<Coupon> {
        match Coupon::parse(code) {
            Some(coupon) => {
                self.store.set(COUPON_KEY, coupon.code())?;
                self.coupon = Some(coupon);
                info!(code = coupon.code(), "Coupon applied");
                Ok(coupon)
            }
            None => {
                self.coupon = None;
                self.store.remove(COUPON_KEY)?;
                Err(CoreError::UnknownCoupon {
                    code: code.trim().to_uppercase(),
                }
                .into())
            }
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The active coupon, if any.
    pub fn coupon(&self) -> Option<Coupon> {
        self.coupon
    }

    /// Derives the totals block for the current cart state.
    pub fn totals(&self, shipping_selection: Option<Money>) -> PricingResult {
        PricingResult::compute(self.cart.subtotal(), self.coupon, shipping_selection)
    }

    /// Consumes the wrapper, returning the backing store.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn persist(&mut self) -> StoreResult<()> {
        let snapshot = serde_json::to_string(self.cart.items())?;
        self.store.set(CART_KEY, &snapshot)?;
        debug!(lines = self.cart.line_count(), "Cart snapshot persisted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn pan() -> Product {
        Product::new("Pan", Money::from_cents(12_100))
    }

    fn leche() -> Product {
        Product::new("Leche", Money::from_cents(24_200))
    }

    #[test]
    fn test_open_empty_store() {
        let store = CartStore::open(MemoryStore::new()).unwrap();
        assert!(store.cart().is_empty());
        assert_eq!(store.coupon(), None);
    }

    #[test]
    fn test_mutations_persist_and_restore() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.add_or_increment(&pan(), 2).unwrap();
        store.add_or_increment(&leche(), 1).unwrap();
        store.set_quantity(1, 4).unwrap();

        // Reopen over the same backing store: element-wise identical cart
        let items_before = store.cart().items().to_vec();
        let reopened = CartStore::open(store.into_inner()).unwrap();
        assert_eq!(reopened.cart().items(), items_before.as_slice());
        assert_eq!(reopened.cart().items()[1].quantity, 4);
    }

    #[test]
    fn test_snapshot_wire_shape_on_disk() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.add_or_increment(&pan(), 2).unwrap();

        let backing = store.into_inner();
        assert_eq!(
            backing.get(CART_KEY).unwrap().unwrap(),
            r#"[{"nombre":"Pan","precio":121.0,"cantidad":2}]"#
        );
    }

    #[test]
    fn test_rejected_add_does_not_persist() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        assert!(store.add_or_increment(&pan(), 0).is_err());

        let backing = store.into_inner();
        assert_eq!(backing.get(CART_KEY).unwrap(), None); // Never written
    }

    #[test]
    fn test_corrupted_snapshot_restores_empty() {
        let mut backing = MemoryStore::new();
        backing.set(CART_KEY, "{definitely not json").unwrap();

        let store = CartStore::open(backing).unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_invariant_breaking_snapshot_restores_empty() {
        let mut backing = MemoryStore::new();
        // Parses fine, but cantidad 0 breaks the quantity invariant
        backing
            .set(CART_KEY, r#"[{"nombre":"Pan","precio":121,"cantidad":0}]"#)
            .unwrap();

        let store = CartStore::open(backing).unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_oversized_snapshot_values_restore_empty() {
        // Magnitudes no mutation could produce must not survive a restore;
        // subtotal arithmetic on them would leave i64 range
        let mut backing = MemoryStore::new();
        backing
            .set(
                CART_KEY,
                r#"[{"nombre":"Pan","precio":121,"cantidad":9223372036854775807}]"#,
            )
            .unwrap();

        let store = CartStore::open(backing).unwrap();
        assert!(store.cart().is_empty());

        let mut backing = MemoryStore::new();
        backing
            .set(
                CART_KEY,
                r#"[{"nombre":"Pan","precio":1e16,"cantidad":2}]"#,
            )
            .unwrap();

        let store = CartStore::open(backing).unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_clear_removes_persisted_key() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.add_or_increment(&pan(), 1).unwrap();
        store.clear().unwrap();

        assert!(store.cart().is_empty());
        let backing = store.into_inner();
        assert_eq!(backing.get(CART_KEY).unwrap(), None); // Key gone, not "[]"
    }

    #[test]
    fn test_apply_coupon_persists_canonical_code() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        let coupon = store.apply_coupon(" descuento10 ").unwrap();
        assert_eq!(coupon, Coupon::Descuento10);

        let backing = store.into_inner();
        assert_eq!(
            backing.get(COUPON_KEY).unwrap(),
            Some("DESCUENTO10".to_string())
        );
    }

    #[test]
    fn test_invalid_coupon_clears_previous() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.apply_coupon("DESCUENTO20").unwrap();

        assert!(store.apply_coupon("FOO").is_err());
        assert_eq!(store.coupon(), None);

        let backing = store.into_inner();
        assert_eq!(backing.get(COUPON_KEY).unwrap(), None);
    }

    #[test]
    fn test_unknown_persisted_coupon_cleared_on_open() {
        let mut backing = MemoryStore::new();
        backing.set(COUPON_KEY, "EXPIRED2019").unwrap();

        let store = CartStore::open(backing).unwrap();
        assert_eq!(store.coupon(), None);

        let backing = store.into_inner();
        assert_eq!(backing.get(COUPON_KEY).unwrap(), None);
    }

    #[test]
    fn test_coupon_restores_across_reopen() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.apply_coupon("DESCUENTO10").unwrap();

        let reopened = CartStore::open(store.into_inner()).unwrap();
        assert_eq!(reopened.coupon(), Some(Coupon::Descuento10));
    }

    #[test]
    fn test_clear_keeps_active_coupon() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.add_or_increment(&pan(), 1).unwrap();
        store.apply_coupon("DESCUENTO10").unwrap();

        store.clear().unwrap();
        assert_eq!(store.coupon(), Some(Coupon::Descuento10));
    }

    #[test]
    fn test_totals_two_pan_with_coupon() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.add_or_increment(&pan(), 2).unwrap();
        store.apply_coupon("DESCUENTO10").unwrap();

        let totals = store.totals(None);
        assert_eq!(totals.subtotal, Money::from_cents(24_200));
        assert_eq!(totals.discount, Money::from_cents(2_400));
        assert_eq!(totals.total, Money::from_cents(21_800));
    }

    #[test]
    fn test_remove_returns_line_and_persists_shift() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store.add_or_increment(&pan(), 1).unwrap();
        store.add_or_increment(&leche(), 1).unwrap();

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.name, "Pan");

        let reopened = CartStore::open(store.into_inner()).unwrap();
        assert_eq!(reopened.cart().items()[0].name, "Leche");
        assert_eq!(reopened.cart().line_count(), 1);
    }
}
