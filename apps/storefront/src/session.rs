//! # Intent Dispatch
//!
//! Every shopper action flows through one place: [`Session::handle`] takes
//! an [`Intent`] and returns either a status message or a [`UiError`].
//!
//! ## Intent Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One Intent, One Handler                             │
//! │                                                                         │
//! │  Terminal input            Intent                      Store call      │
//! │  ──────────────            ──────                      ──────────      │
//! │  add pan 2          AddItem { name, quantity }    add_or_increment     │
//! │  inc 1              ChangeQuantity(Increment)     increment            │
//! │  dec 1              ChangeQuantity(Decrement)     decrement            │
//! │  qty 1 5            ChangeQuantity(Set(5))        set_quantity         │
//! │  rm 1               RemoveItem { position }       remove               │
//! │  coupon DESCUENTO10 ApplyCoupon { code }          apply_coupon         │
//! │  ship 2             SelectShipping { option }     (session state)      │
//! │  clear              ClearCart                     clear                │
//! │  checkout           Checkout                      totals + simulate    │
//! │                                                                         │
//! │  Result<String, UiError> either way; the caller re-renders the cart    │
//! │  view after every intent, success or failure.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Positions in intents are 1-based, matching the numbering every rendered
//! view shows. The session converts to 0-based indices at this boundary and
//! nowhere else.

use canasta_core::{Cart, Catalog, Coupon, Money, PricingResult, Product};
use canasta_store::{CartStore, StringStore};
use tracing::debug;

use crate::checkout;
use crate::config::AppConfig;
use crate::error::{ErrorCode, UiError};
use crate::render;

/// A quantity adjustment for an existing cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Add one
    Increment,

    /// Subtract one, stopping at 1
    Decrement,

    /// Replace with a specific value, clamped to at least 1
    Set(i64),
}

/// Everything a shopper can ask the storefront to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add a catalog product to the cart, or bump its quantity
    AddItem { name: String, quantity: i64 },

    /// Adjust the quantity of the line at a 1-based position
    ChangeQuantity {
        position: usize,
        change: QuantityChange,
    },

    /// Remove the line at a 1-based position
    RemoveItem { position: usize },

    /// Apply a coupon code; an unknown code also drops any active coupon
    ApplyCoupon { code: String },

    /// Pick a shipping method by its 1-based menu number
    SelectShipping { option: usize },

    /// Empty the cart (the active coupon survives)
    ClearCart,

    /// Submit the order and, on confirmation, empty the cart
    Checkout,
}

/// A shipping method the shopper can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingOption {
    pub label: &'static str,
    pub cost: Money,
}

/// Available shipping methods, in menu order.
pub const SHIPPING_OPTIONS: &[ShippingOption] = &[
    ShippingOption {
        label: "Store pickup",
        cost: Money::from_cents(0),
    },
    ShippingOption {
        label: "Standard delivery",
        cost: Money::from_cents(50_000),
    },
    ShippingOption {
        label: "Express delivery",
        cost: Money::from_cents(120_000),
    },
];

/// A shopper's session: cart store, catalog, and selected shipping.
///
/// Generic over the persistence backend so tests can run against
/// [`canasta_store::MemoryStore`] while the binary uses a
/// [`canasta_store::FileStore`].
pub struct Session<S: StringStore> {
    store: CartStore<S>,
    catalog: Catalog,
    shipping: Option<ShippingOption>,
    config: AppConfig,
}

impl<S: StringStore> Session<S> {
    /// Creates a session over an already-opened cart store.
    pub fn new(store: CartStore<S>, catalog: Catalog, config: AppConfig) -> Self {
        Session {
            store,
            catalog,
            shipping: None,
            config,
        }
    }

    /// Dispatches one intent.
    ///
    /// ## Behavior
    /// - Mutating intents persist through the cart store before returning
    /// - Failures leave the cart exactly as it was
    /// - `Checkout` is the only intent that awaits anything
    ///
    /// ## Returns
    /// A status message to print above the re-rendered cart view.
    pub async fn handle(&mut self, intent: Intent) -> Result<String, UiError> {
        debug!(?intent, "Handling intent");

        match intent {
            Intent::AddItem { name, quantity } => {
                let product = self
                    .catalog
                    .find(&name)
                    .cloned()
                    .ok_or_else(|| UiError::not_found("Product", name.trim()))?;
                self.store.add_or_increment(&product, quantity)?;
                Ok(format!("Added {} x {}", quantity, product.name))
            }

            Intent::ChangeQuantity { position, change } => {
                let index = self.position_to_index(position)?;
                match change {
                    QuantityChange::Increment => self.store.increment(index)?,
                    QuantityChange::Decrement => self.store.decrement(index)?,
                    QuantityChange::Set(quantity) => self.store.set_quantity(index, quantity)?,
                }
                let line = self.store.cart().get(index).ok_or_else(|| {
                    UiError::new(ErrorCode::Internal, "Cart line vanished during update")
                })?;
                Ok(format!("{} is now x{}", line.name, line.quantity))
            }

            Intent::RemoveItem { position } => {
                let index = self.position_to_index(position)?;
                let removed = self.store.remove(index)?;
                Ok(format!("Removed {}", removed.name))
            }

            Intent::ApplyCoupon { code } => {
                let coupon = self.store.apply_coupon(&code)?;
                Ok(format!("Coupon {} applied", coupon.code()))
            }

            Intent::SelectShipping { option } => {
                let chosen = option
                    .checked_sub(1)
                    .and_then(|i| SHIPPING_OPTIONS.get(i))
                    .ok_or_else(|| {
                        UiError::validation(format!("No shipping option {}", option))
                    })?;
                self.shipping = Some(*chosen);
                Ok(format!(
                    "Shipping set to {} ({})",
                    chosen.label,
                    self.config.format_money(chosen.cost)
                ))
            }

            Intent::ClearCart => {
                self.store.clear()?;
                Ok("Cart emptied".to_string())
            }

            Intent::Checkout => {
                let totals = self.totals();
                let confirmation = checkout::simulate(
                    self.store.cart().items(),
                    totals.total,
                    self.config.checkout_delay,
                )
                .await?;
                self.store.clear()?;
                Ok(render::receipt(&confirmation, &self.config))
            }
        }
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        self.store.cart()
    }

    /// Active coupon, if any.
    pub fn coupon(&self) -> Option<Coupon> {
        self.store.coupon()
    }

    /// Selected shipping method, if any.
    pub fn shipping(&self) -> Option<&ShippingOption> {
        self.shipping.as_ref()
    }

    /// Catalog currently on offer.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Session configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Totals for the current cart, coupon, and shipping selection.
    pub fn totals(&self) -> PricingResult {
        self.store.totals(self.shipping.map(|s| s.cost))
    }

    /// Swaps in a freshly fetched catalog.
    ///
    /// Cart lines keep their frozen prices; only future adds see the new
    /// catalog.
    pub fn replace_catalog(&mut self, products: Vec<Product>) {
        debug!(count = products.len(), "Replacing catalog");
        self.catalog = Catalog::new(products);
    }

    fn position_to_index(&self, position: usize) -> Result<usize, UiError> {
        position.checked_sub(1).ok_or_else(|| {
            UiError::new(
                ErrorCode::NotFound,
                format!("No cart line at position {}", position),
            )
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
