//! # Application Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CANASTA_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so it is cloned freely
//! and never wrapped in a lock.

use std::path::PathBuf;
use std::time::Duration;

use canasta_core::Money;

/// Application configuration.
///
/// ## Fields
/// All fields have development-friendly defaults; the environment
/// overrides are there for tests and actual deployments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store name (shown in the banner and on receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Data directory override. `None` means the platform app-data dir.
    pub data_dir: Option<PathBuf>,

    /// Remote catalog feed URL. `None` disables the feed entirely.
    pub feed_url: Option<String>,

    /// How long the simulated checkout takes.
    pub checkout_delay: Duration,
}

impl Default for AppConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Canasta Market"
    /// - Currency: $ with 2 decimals
    /// - Data dir: platform default
    /// - Feed: disabled
    /// - Checkout delay: 2 seconds
    fn default() -> Self {
        AppConfig {
            store_name: "Canasta Market".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            data_dir: None,
            feed_url: None,
            checkout_delay: Duration::from_secs(2),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CANASTA_STORE_NAME`: Override store name
    /// - `CANASTA_DATA_DIR`: Override the persistence directory
    /// - `CANASTA_FEED_URL`: Enable the remote catalog feed
    /// - `CANASTA_CHECKOUT_DELAY_MS`: Override the checkout delay
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(store_name) = std::env::var("CANASTA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(dir) = std::env::var("CANASTA_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(url) = std::env::var("CANASTA_FEED_URL") {
            if !url.trim().is_empty() {
                config.feed_url = Some(url);
            }
        }

        if let Ok(delay_str) = std::env::var("CANASTA_CHECKOUT_DELAY_MS") {
            if let Ok(ms) = delay_str.parse::<u64>() {
                config.checkout_delay = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Formats a money amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(12_100)), "$121.00");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = self.currency_decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_positive() {
        let config = AppConfig::default();
        assert_eq!(config.format_money(Money::from_cents(12_100)), "$121.00");
        assert_eq!(config.format_money(Money::from_cents(18_150)), "$181.50");
        assert_eq!(config.format_money(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_money(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_money_negative() {
        let config = AppConfig::default();
        assert_eq!(config.format_money(Money::from_cents(-2_400)), "-$24.00");
    }

    #[test]
    fn test_format_money_large() {
        let config = AppConfig::default();
        assert_eq!(
            config.format_money(Money::from_cents(123_456_789)),
            "$1234567.89"
        );
    }
}
