//! # UI Error Type
//!
//! Unified error type for intent handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                          │
//! │                                                                         │
//! │  Terminal                     Rust Layers                                │
//! │  ────────                     ───────────                                │
//! │                                                                         │
//! │  > add pan 0                                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session::handle(Intent)                                          │  │
//! │  │  Result<String, UiError>                                          │  │
//! │  │         │                                                         │  │
//! │  │         ▼                                                         │  │
//! │  │  Store error? ── StoreError::Io { key: "carrito", .. } ──┐       │  │
//! │  │         │                                                 │       │  │
//! │  │         ▼                                                 ▼       │  │
//! │  │  Domain error? ── CoreError::Validation ───────────── UiError ──►│  │
//! │  │         │                                                         │  │
//! │  │         ▼                                                         │  │
//! │  │  Success message ────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  "quantity must be positive"  ← message printed, cart view re-rendered  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler failure becomes one of these; nothing panics its way out
//! of the session loop.

use canasta_core::CoreError;
use canasta_store::StoreError;

use crate::checkout::CheckoutError;

/// Error returned from intent handlers.
///
/// Carries a machine-readable code (for tests and any embedder that wants
/// to branch) plus the human-readable message the terminal prints.
#[derive(Debug, Clone)]
pub struct UiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for intent outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Product or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Coupon code rejected (and any previous coupon dropped)
    CouponRejected,

    /// Persistence failed; in-memory state is still correct
    StorageError,

    /// Checkout attempted on an empty cart
    EmptyCart,

    /// Anything that should never happen
    Internal,
}

impl UiError {
    /// Creates a new UI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        UiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        UiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts domain errors to UI errors.
///
/// Line indices are 0-based inside the core but every surface the shopper
/// sees is 1-based, so the position is translated here, at the boundary.
impl From<CoreError> for UiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LineNotFound { index } => UiError::new(
                ErrorCode::NotFound,
                format!("No cart line at position {}", index + 1),
            ),
            CoreError::UnknownCoupon { code } => UiError::new(
                ErrorCode::CouponRejected,
                format!("Coupon '{}' is not valid; any previous coupon was removed", code),
            ),
            CoreError::Validation(e) => UiError::validation(e.to_string()),
        }
    }
}

/// Converts persistence errors to UI errors.
impl From<StoreError> for UiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::DataDir { .. } => {
                tracing::error!(error = %err, "Data directory unavailable");
                UiError::new(ErrorCode::StorageError, "Could not open the data directory")
            }
            StoreError::Io { .. } => {
                // Log the actual error but return a calmer message: the
                // in-memory cart still holds the change
                tracing::error!(error = %err, "Persisting cart state failed");
                UiError::new(
                    ErrorCode::StorageError,
                    "Could not save the cart; changes are kept for this session",
                )
            }
            StoreError::Serialize(e) => {
                tracing::error!(error = %e, "Snapshot serialization failed");
                UiError::new(ErrorCode::Internal, "Could not serialize the cart")
            }
        }
    }
}

/// Converts checkout errors to UI errors.
impl From<CheckoutError> for UiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => {
                UiError::new(ErrorCode::EmptyCart, "Cannot checkout an empty cart")
            }
        }
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for UiError {}

// =============================================================================
// Unit Tests
// =============================================================================
