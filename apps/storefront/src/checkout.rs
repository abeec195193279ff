//! Checkout simulation.
//!
//! There is no payment gateway behind this storefront; checkout stands in
//! for one by waiting a configurable delay and then producing a
//! [`Confirmation`]. The cart snapshot and total are captured when the
//! checkout starts, so what the shopper confirmed is what the receipt
//! shows even though the cart is cleared afterwards.

use std::time::Duration;

use canasta_core::{LineItem, Money};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Errors that can occur during checkout.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was requested with nothing in the cart.
    #[error("Cannot checkout an empty cart")]
    EmptyCart,
}

/// Outcome of a completed checkout.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// Unique order identifier
    pub order_id: Uuid,

    /// When the order was confirmed
    pub confirmed_at: DateTime<Utc>,

    /// The cart lines as they were when checkout started
    pub items: Vec<LineItem>,

    /// Total charged, after discount and shipping
    pub total: Money,
}

/// Simulates submitting an order.
///
/// An empty cart fails immediately, without waiting out the delay. A
/// non-empty cart snapshots its lines, waits `delay` to model gateway
/// latency, and resolves with a confirmation.
pub async fn simulate(
    items: &[LineItem],
    total: Money,
    delay: Duration,
) -> Result<Confirmation, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    // Snapshot before waiting; the receipt reflects the cart as submitted
    let snapshot = items.to_vec();

    tracing::debug!(lines = snapshot.len(), total = %total, "Submitting order");
    tokio::time::sleep(delay).await;

    let confirmation = Confirmation {
        order_id: Uuid::new_v4(),
        confirmed_at: Utc::now(),
        items: snapshot,
        total,
    };

    tracing::info!(order_id = %confirmation.order_id, total = %total, "Order confirmed");
    Ok(confirmation)
}

// =============================================================================
// Unit Tests
// =============================================================================
