//! # Store Error Types
//!
//! Error types for persistence and feed operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / CoreError                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key and operation context         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UiError (in storefront) ← Code + message for rendering                │
//! │                                                                         │
//! │  reqwest::Error / bad payload shape                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FeedError (this module) ← Logged at warn, prior catalog kept;         │
//! │                            never shown to the shopper                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT an error: a malformed persisted snapshot. Restore
//! degrades that to an empty cart and logs it, because refusing to start
//! over stale bytes would strand the user.

use canasta_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing data directory could not be created or opened.
    ///
    /// ## When This Occurs
    /// - Permissions problem on the parent directory
    /// - A file already exists where the directory should go
    #[error("Could not prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a persisted key failed.
    ///
    /// ## When This Occurs
    /// - Disk full, permissions, or the directory vanished mid-run
    ///
    /// A failed write leaves the in-memory cart authoritative; the
    /// previously persisted snapshot remains the durable fallback.
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the cart snapshot failed.
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A domain rule rejected the operation before anything was written.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog feed errors.
///
/// Every variant is non-fatal by contract: the caller logs it and keeps
/// serving the previous catalog.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP request failed or returned a non-success status.
    #[error("Feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The payload parsed as JSON but was not an array.
    #[error("Feed payload is not a JSON array")]
    NotAnArray,

    /// Every entry in the feed failed shape validation.
    ///
    /// An empty refresh would wipe the catalog, so it is rejected whole.
    #[error("No valid products in feed")]
    Empty,
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through_transparently() {
        let core = CoreError::LineNotFound { index: 2 };
        let store: StoreError = core.into();
        // transparent: the wrapped message is the message
        assert_eq!(store.to_string(), "No cart line at index 2");
    }

    #[test]
    fn test_io_error_carries_key_context() {
        let err = StoreError::Io {
            key: "carrito".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("carrito"));
    }
}
