//! # canasta-store: Persistence & Catalog Feed
//!
//! This crate keeps the in-memory cart and the outside world in sync.
//! It persists cart state between runs and pulls optional catalog
//! refreshes from a remote feed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Canasta Data Flow                                │
//! │                                                                         │
//! │  Storefront intent (add, remove, coupon, ...)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    canasta-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │  StringStore  │    │     feed     │  │   │
//! │  │   │   (cart.rs)   │    │    (kv.rs)    │    │  (feed.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ mutate, then  │◄───│ FileStore     │    │ fetch + per- │  │   │
//! │  │   │ persist       │    │ MemoryStore   │    │ entry checks │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                              │                  │
//! │       ▼                                              ▼                  │
//! │  "carrito" / "cuponAplicado" files            Remote JSON feed          │
//! │  under the app data directory                 (optional)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `StringStore` backend trait and its implementations
//! - [`cart`] - `CartStore`: cart mutations with persist-after-mutation
//! - [`feed`] - Remote catalog feed fetch and per-entry validation
//! - [`error`] - Store and feed error types
//!
//! ## Usage
//!
//! ```rust
//! use canasta_core::catalog::Catalog;
//! use canasta_store::{CartStore, MemoryStore};
//!
//! let mut store = CartStore::open(MemoryStore::new())?;
//! let catalog = Catalog::base();
//!
//! store.add_or_increment(catalog.find("Pan").unwrap(), 2)?;
//! assert_eq!(store.cart().total_quantity(), 2);
//! # Ok::<(), canasta_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod feed;
pub mod kv;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartStore;
pub use error::{FeedError, StoreError, StoreResult};
pub use kv::{FileStore, MemoryStore, StringStore};

// =============================================================================
// Persisted Keys
// =============================================================================

/// Key under which the cart snapshot is persisted: a JSON array of
/// `{"nombre", "precio", "cantidad"}` objects.
pub const CART_KEY: &str = "carrito";

/// Key under which the active coupon code is persisted, always in its
/// canonical uppercase form.
pub const COUPON_KEY: &str = "cuponAplicado";
