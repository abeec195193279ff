//! # Error Types
//!
//! Domain-specific error types for canasta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  canasta-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  canasta-store errors (separate crate)                                  │
//! │  ├── StoreError       - Persistence failures                            │
//! │  └── FeedError        - Catalog feed failures (logged, never surfaced)  │
//! │                                                                         │
//! │  Storefront errors (in app)                                             │
//! │  └── UiError          - What the user sees (code + message)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UiError → Terminal   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (line index, coupon code, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart line cannot be found.
    ///
    /// ## When This Occurs
    /// - Index past the end of the cart
    /// - Caller cached an index across a removal (indices shift down)
    ///
    /// ## User Workflow
    /// ```text
    /// Cart has 2 lines (indices 0, 1)
    ///      │
    ///      ▼
    /// remove(1), then increment(1)
    ///      │
    ///      ▼
    /// LineNotFound { index: 1 }
    ///      │
    ///      ▼
    /// UI shows: "No cart line at position 2"
    /// ```
    #[error("No cart line at index {index}")]
    LineNotFound { index: usize },

    /// Coupon code is not in the accepted set.
    ///
    /// The code has already been normalized (trimmed, uppercased) before
    /// this error is produced, so the message shows what was actually
    /// checked.
    #[error("Unknown coupon code: {code}")]
    UnknownCoupon { code: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive (at least 1 for quantities).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is outside the accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative (zero is allowed).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineNotFound { index: 3 };
        assert_eq!(err.to_string(), "No cart line at index 3");

        let err = CoreError::UnknownCoupon {
            code: "FOO".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown coupon code: FOO");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
