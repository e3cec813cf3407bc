//! # Session Configuration
//!
//! Behavior knobs and display settings fixed at session construction.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

use market_core::Price;

/// How size/color selections are checked in `add_to_cart`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Accept any selection string; option checking is left to the
    /// product detail screen.
    #[default]
    Lenient,

    /// Reject selections that are not among the product's declared
    /// sizes/colors.
    Strict,
}

/// Session configuration.
///
/// ## Fields
/// Defaults suit the demo catalog; a host application overrides what it
/// needs at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Size/color validation policy for cart additions.
    pub selection_policy: SelectionPolicy,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for SessionConfig {
    /// Returns the default configuration: lenient selections, USD display.
    fn default() -> Self {
        SessionConfig {
            selection_policy: SelectionPolicy::Lenient,
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl SessionConfig {
    /// Default configuration with strict size/color checking.
    pub fn strict() -> Self {
        SessionConfig {
            selection_policy: SelectionPolicy::Strict,
            ..SessionConfig::default()
        }
    }

    /// Formats a price as a currency string at the configured precision.
    ///
    /// This is the presentation boundary where stored amounts get rounded.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::Price;
    /// use market_session::SessionConfig;
    ///
    /// let config = SessionConfig::default();
    /// assert_eq!(config.format_price(Price::new(49.7834)), "$49.78");
    /// ```
    pub fn format_price(&self, price: Price) -> String {
        let amount = price.amount();
        format!(
            "{}{}{:.*}",
            if amount < 0.0 { "-" } else { "" },
            self.currency_symbol,
            self.currency_decimals as usize,
            amount.abs()
        )
    }
}
