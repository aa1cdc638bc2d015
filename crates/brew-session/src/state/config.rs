//! # Configuration State
//!
//! Shop settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BREW_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup, shared between sessions behind an `Arc`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use brew_core::{Money, PriceTable, TransitionPolicy};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown on the home screen and in payment descriptions
    pub shop_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Surcharges applied when items are added to a cart
    pub prices: PriceTable,

    /// How strictly admins may move orders between statuses
    pub transition_policy: TransitionPolicy,
}

impl Default for ConfigState {
    /// Defaults match the shop as it trades today: rands, R7 extras,
    /// the four priced sides, strict status transitions.
    fn default() -> Self {
        ConfigState {
            shop_name: "Brewline Coffee".to_string(),
            currency_symbol: "R".to_string(),
            currency_decimals: 2,
            prices: PriceTable::default(),
            transition_policy: TransitionPolicy::Strict,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BREW_SHOP_NAME`: Override shop name
    /// - `BREW_CURRENCY_SYMBOL`: Override currency symbol
    /// - `BREW_EXTRA_PRICE_CENTS`: Surcharge per extra, in cents
    /// - `BREW_SIDE_PRICES`: Replace side surcharges, e.g. `Chips=2000,Salad=3000`
    /// - `BREW_TRANSITION_POLICY`: `strict` or `permissive`
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("BREW_SHOP_NAME") {
            config.shop_name = name;
        }

        if let Some(symbol) = lookup("BREW_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("BREW_EXTRA_PRICE_CENTS") {
            match raw.trim().parse::<i64>() {
                Ok(cents) if cents >= 0 => {
                    config.prices.extra_unit_price = Money::from_cents(cents);
                }
                _ => warn!(value = %raw, "Ignoring invalid BREW_EXTRA_PRICE_CENTS"),
            }
        }

        if let Some(raw) = lookup("BREW_SIDE_PRICES") {
            match parse_side_prices(&raw) {
                Some(sides) => {
                    config.prices.side_prices = sides.into_iter().collect();
                }
                None => warn!(value = %raw, "Ignoring invalid BREW_SIDE_PRICES"),
            }
        }

        if let Some(raw) = lookup("BREW_TRANSITION_POLICY") {
            match TransitionPolicy::parse(&raw) {
                Some(policy) => config.transition_policy = policy,
                None => warn!(value = %raw, "Ignoring invalid BREW_TRANSITION_POLICY"),
            }
        }

        config
    }

    /// Formats a money amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::Money;
    /// use brew_session::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(8450)), "R84.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let decimals = u32::from(self.currency_decimals.min(2));
        let divisor = 10_i64.pow(decimals);
        let scaled = cents / 10_i64.pow(2 - decimals);
        let whole = scaled / divisor;
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole.abs(), frac, width = decimals as usize)
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// Parses `Name=cents,Name=cents`. Any malformed pair rejects the whole value.
fn parse_side_prices(raw: &str) -> Option<Vec<(String, Money)>> {
    raw.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let (name, cents) = pair.split_once('=')?;
            let name = name.trim();
            let cents = cents.trim().parse::<i64>().ok()?;
            (!name.is_empty() && cents >= 0).then(|| (name.to_string(), Money::from_cents(cents)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.prices.extra_unit_price, Money::from_major(7));
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("BREW_SHOP_NAME", "Harbour Beans"),
            ("BREW_EXTRA_PRICE_CENTS", "850"),
            ("BREW_SIDE_PRICES", "Chips=2500, Wedges=3000"),
            ("BREW_TRANSITION_POLICY", "permissive"),
        ]));

        assert_eq!(config.shop_name, "Harbour Beans");
        assert_eq!(config.prices.extra_unit_price, Money::from_cents(850));
        assert_eq!(config.prices.side_price("Wedges"), Some(Money::from_major(30)));
        assert_eq!(config.prices.side_price("Salad"), None);
        assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ConfigState::from_lookup(lookup(&[
            ("BREW_EXTRA_PRICE_CENTS", "-5"),
            ("BREW_SIDE_PRICES", "Chips=lots"),
            ("BREW_TRANSITION_POLICY", "chaotic"),
        ]));

        assert_eq!(config.prices, PriceTable::default());
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "R12.34");
        assert_eq!(config.format_currency(Money::from_cents(-550)), "-R5.50");
        assert_eq!(config.format_currency(Money::zero()), "R0.00");

        let whole = ConfigState {
            currency_decimals: 0,
            ..ConfigState::default()
        };
        assert_eq!(whole.format_currency(Money::from_cents(9000)), "R90");
    }
}
