//! # Catalog Feed
//!
//! Optional remote refresh of the product catalog.
//!
//! The feed is a JSON array of `{"nombre": string, "precio": number}`
//! entries with pre-tax prices. Validation is per entry: a junk entry is
//! dropped and logged, the rest survive. The refresh is rejected whole only
//! when there is nothing usable at all (request failed, payload not an
//! array, zero survivors), in which case the caller keeps the catalog it
//! already has.
//!
//! ## Validation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET feed URL                                                           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  JSON array? ──no──► FeedError::NotAnArray (catalog kept)               │
//! │      │                                                                  │
//! │      ▼ per entry                                                        │
//! │  "nombre" a usable string?  ──no──► drop entry                          │
//! │  "precio" a number within the price cap? ──no──► drop entry             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  gross up by IVA ──► Product                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  any survivors? ──no──► FeedError::Empty (catalog kept)                 │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Vec<Product> ──► caller swaps the whole catalog                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use canasta_core::validation::validate_product_name;
use canasta_core::{Money, Product, TaxRate, IVA_BPS, MAX_UNIT_PRICE_CENTS};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{FeedError, FeedResult};

/// Fetches the catalog feed and validates it into products.
///
/// Errors here are non-fatal by contract: callers log them and keep the
/// previous catalog.
pub async fn fetch_catalog(client: &reqwest::Client, url: &str) -> FeedResult<Vec<Product>> {
    debug!(url, "Requesting catalog feed");

    let payload: Value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let products = parse_feed(&payload)?;
    info!(count = products.len(), "Catalog feed accepted");
    Ok(products)
}

/// Validates a feed payload into products, entry by entry.
///
/// Split from the HTTP call so the shape rules are testable without a
/// server.
pub fn parse_feed(payload: &Value) -> FeedResult<Vec<Product>> {
    let entries = payload.as_array().ok_or(FeedError::NotAnArray)?;
    let rate = TaxRate::from_bps(IVA_BPS);

    let mut products = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;
    for entry in entries {
        match parse_entry(entry, rate) {
            Some(product) => products.push(product),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = products.len(), "Dropped malformed feed entries");
    }
    if products.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok(products)
}

/// One feed entry to one product, or `None` if the shape is wrong.
///
/// Required shape: `nombre` a non-empty string of sane length, `precio` a
/// non-negative number in pre-tax major units, at most the price cap. The
/// cap check happens in the f64 domain, before the cents cast: a huge
/// `precio` would saturate the cast and overflow the tax adjustment.
fn parse_entry(entry: &Value, rate: TaxRate) -> Option<Product> {
    let name = entry.get("nombre")?.as_str()?.trim();
    if validate_product_name(name).is_err() {
        return None;
    }

    let precio = entry.get("precio")?.as_f64()?;
    let net_cents = (precio * 100.0).round();
    if !(0.0..=MAX_UNIT_PRICE_CENTS as f64).contains(&net_cents) {
        return None;
    }

    Some(Product::from_net(name, Money::from_cents(net_cents as i64), rate))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_feed_is_tax_adjusted() {
        let payload = json!([
            { "nombre": "Pan", "precio": 100 },
            { "nombre": "Miel", "precio": 80.5 },
        ]);

        let products = parse_feed(&payload).unwrap();
        assert_eq!(products.len(), 2);

        assert_eq!(products[0].name, "Pan");
        assert_eq!(products[0].unit_price, Money::from_cents(12_100));

        // 80.50 net = 8050 cents; 21% of 8050 = 1690.5 → 1691 (half-up)
        assert_eq!(products[1].name, "Miel");
        assert_eq!(products[1].unit_price, Money::from_cents(9_741));
    }

    #[test]
    fn test_bad_entries_are_dropped_individually() {
        let payload = json!([
            { "nombre": "Pan", "precio": 100 },
            { "nombre": 42, "precio": 100 },          // name not a string
            { "precio": 100 },                         // name missing
            { "nombre": "Leche", "precio": "gratis" }, // price not a number
            { "nombre": "Queso" },                     // price missing
            { "nombre": "Carne", "precio": -5 },       // negative price
            { "nombre": "   ", "precio": 10 },         // blank name
            { "nombre": "Frutas", "precio": 250 },
        ]);

        let products = parse_feed(&payload).unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pan", "Frutas"]);
    }

    #[test]
    fn test_non_array_payload_rejected_whole() {
        let payload = json!({ "productos": [] });
        assert!(matches!(parse_feed(&payload), Err(FeedError::NotAnArray)));

        let payload = json!("not even an object");
        assert!(matches!(parse_feed(&payload), Err(FeedError::NotAnArray)));
    }

    #[test]
    fn test_zero_survivors_rejected_whole() {
        let payload = json!([
            { "nombre": 1, "precio": 2 },
            { "sin": "campos" },
        ]);
        assert!(matches!(parse_feed(&payload), Err(FeedError::Empty)));

        // An empty array has zero survivors too
        assert!(matches!(parse_feed(&json!([])), Err(FeedError::Empty)));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let payload = json!([{ "nombre": "Muestra", "precio": 0 }]);
        let products = parse_feed(&payload).unwrap();
        assert_eq!(products[0].unit_price, Money::zero());
    }

    #[test]
    fn test_absurd_price_entry_is_dropped_not_fatal() {
        // A shape-valid entry with an out-of-range price must be dropped
        // like any other bad entry; the tax adjustment must never run on it
        let payload = json!([
            { "nombre": "Pan", "precio": 100 },
            { "nombre": "Lingote", "precio": 1e18 },
            { "nombre": "Yate", "precio": (MAX_UNIT_PRICE_CENTS as f64 / 100.0) + 1.0 },
        ]);

        let products = parse_feed(&payload).unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pan"]);
    }
}
