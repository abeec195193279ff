//! Terminal views.
//!
//! Pure string builders; nothing here touches state or prints. The REPL
//! decides when to show which view, and tests assert on the content.
//! All numbering is 1-based to match the positions intents accept.

use canasta_core::{Cart, Catalog, Coupon, PricingResult};

use crate::checkout::Confirmation;
use crate::config::AppConfig;
use crate::session::{ShippingOption, SHIPPING_OPTIONS};

const RULE: &str = "  --------------------------------------------------\n";
const EDGE: &str = "==================================================\n";

/// Renders the catalog as a numbered list.
pub fn catalog_view(catalog: &Catalog, config: &AppConfig) -> String {
    let mut out = format!("{} ({} products)\n", config.store_name, catalog.len());
    for (i, product) in catalog.products().iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<24} {:>10}\n",
            i + 1,
            product.name,
            config.format_money(product.unit_price)
        ));
    }
    out
}

/// Renders the cart with its totals block.
///
/// The discount row appears only when a coupon is active, the shipping row
/// only when a method has been selected. Subtotal and total always show.
pub fn cart_view(
    cart: &Cart,
    coupon: Option<Coupon>,
    shipping: Option<&ShippingOption>,
    totals: &PricingResult,
    config: &AppConfig,
) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::from("Cart\n");
    for (i, line) in cart.items().iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<20} x{:<4} {:>10} {:>12}\n",
            i + 1,
            line.name,
            line.quantity,
            config.format_money(line.unit_price),
            config.format_money(line.line_total())
        ));
    }
    out.push_str(RULE);
    out.push_str(&format!(
        "  {:<28} {:>20}\n",
        "Subtotal",
        config.format_money(totals.subtotal)
    ));
    if let Some(coupon) = coupon {
        out.push_str(&format!(
            "  {:<28} {:>20}\n",
            format!("Discount ({})", coupon.code()),
            format!("-{}", config.format_money(totals.discount))
        ));
    }
    if let Some(option) = shipping {
        out.push_str(&format!(
            "  {:<28} {:>20}\n",
            format!("Shipping ({})", option.label),
            config.format_money(totals.shipping)
        ));
    }
    out.push_str(&format!(
        "  {:<28} {:>20}\n",
        "TOTAL",
        config.format_money(totals.total)
    ));
    out
}

/// Renders the shipping method menu.
pub fn shipping_menu(config: &AppConfig) -> String {
    let mut out = String::from("Shipping options\n");
    for (i, option) in SHIPPING_OPTIONS.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<20} {:>10}\n",
            i + 1,
            option.label,
            config.format_money(option.cost)
        ));
    }
    out
}

/// Renders an order confirmation as a printable receipt.
pub fn receipt(confirmation: &Confirmation, config: &AppConfig) -> String {
    let mut out = String::from(EDGE);
    out.push_str(&format!("  {}\n", config.store_name));
    out.push_str(&format!("  Order {}\n", confirmation.order_id));
    out.push_str(&format!(
        "  {}\n",
        confirmation.confirmed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(RULE);
    for line in &confirmation.items {
        out.push_str(&format!(
            "  {:<20} x{:<4} {:>12}\n",
            line.name,
            line.quantity,
            config.format_money(line.line_total())
        ));
    }
    out.push_str(RULE);
    out.push_str(&format!(
        "  {:<26} {:>12}\n",
        "TOTAL",
        config.format_money(confirmation.total)
    ));
    out.push_str(EDGE);
    out.push_str("  Thank you for your purchase!\n");
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use canasta_core::{Money, Product, TaxRate};
    use chrono::Utc;
    use uuid::Uuid;

    fn pan() -> Product {
        Product::from_net("Pan", Money::from_cents(10_000), TaxRate::from_bps(2100))
    }

    fn cart_with_pan(quantity: i64) -> Cart {
        let mut cart = Cart::new();
        cart.add_or_increment(&pan(), quantity).unwrap();
        cart
    }

    #[test]
    fn test_catalog_view_is_one_based() {
        let view = catalog_view(&Catalog::base(), &AppConfig::default());

        assert!(view.contains(" 1. Pan"));
        assert!(view.contains(" 6. Frutas"));
        assert!(view.contains("$121.00"));
        assert!(view.contains("(6 products)"));
    }

    #[test]
    fn test_empty_cart_view() {
        let cart = Cart::new();
        let totals = PricingResult::compute(cart.subtotal(), None, None);

        let view = cart_view(&cart, None, None, &totals, &AppConfig::default());

        assert!(view.contains("empty"));
        assert!(!view.contains("TOTAL"));
    }

    #[test]
    fn test_cart_view_totals_block() {
        let cart = cart_with_pan(2);
        let totals = PricingResult::compute(cart.subtotal(), Some(Coupon::Descuento10), None);

        let view = cart_view(
            &cart,
            Some(Coupon::Descuento10),
            None,
            &totals,
            &AppConfig::default(),
        );

        assert!(view.contains(" 1. Pan"));
        assert!(view.contains("x2"));
        assert!(view.contains("$242.00"));
        assert!(view.contains("Discount (DESCUENTO10)"));
        assert!(view.contains("-$24.00"));
        assert!(view.contains("$218.00"));
        assert!(!view.contains("Shipping"));
    }

    #[test]
    fn test_cart_view_shipping_row_when_selected() {
        let cart = cart_with_pan(2);
        let option = ShippingOption {
            label: "Standard delivery",
            cost: Money::from_cents(50_000),
        };
        let totals = PricingResult::compute(cart.subtotal(), None, Some(option.cost));

        let view = cart_view(&cart, None, Some(&option), &totals, &AppConfig::default());

        assert!(view.contains("Shipping (Standard delivery)"));
        assert!(view.contains("$500.00"));
        assert!(view.contains("$742.00"));
    }

    #[test]
    fn test_shipping_menu_lists_all_options() {
        let menu = shipping_menu(&AppConfig::default());

        assert!(menu.contains(" 1. Store pickup"));
        assert!(menu.contains(" 2. Standard delivery"));
        assert!(menu.contains(" 3. Express delivery"));
        assert!(menu.contains("$1200.00"));
    }

    #[test]
    fn test_receipt_shows_order_and_total() {
        let cart = cart_with_pan(2);
        let confirmation = Confirmation {
            order_id: Uuid::new_v4(),
            confirmed_at: Utc::now(),
            items: cart.items().to_vec(),
            total: Money::from_cents(24_200),
        };

        let view = receipt(&confirmation, &AppConfig::default());

        assert!(view.contains(&confirmation.order_id.to_string()));
        assert!(view.contains("Canasta Market"));
        assert!(view.contains("Pan"));
        assert!(view.contains("$242.00"));
        assert!(view.contains("Thank you"));
    }
}
