//! # Pricing
//!
//! Computes the unit price of one configured item:
//!
//! ```text
//! line_unit_price = base_price
//!                 + extras.len() × extra_unit_price
//!                 + side_prices[side]          (0 when side is absent or unknown)
//! ```
//!
//! Drinks chosen with a meal carry no surcharge.
//!
//! ## Unknown sides
//! A side name missing from the table prices at zero instead of being
//! rejected. That is the behaviour the shop runs today; changing it is a
//! product decision, not a bug fix.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use ts_rs::TS;

use crate::cart::Configuration;
use crate::money::Money;

/// Flat surcharge per selected extra (R7).
pub const DEFAULT_EXTRA_PRICE: Money = Money::from_major(7);

/// Computes the frozen unit price for a line.
///
/// ```rust
/// use std::collections::{BTreeMap, BTreeSet};
/// use brew_core::money::Money;
/// use brew_core::pricing::compute_line_price;
///
/// let sides = BTreeMap::from([("Chips".to_string(), Money::from_major(20))]);
/// let extras = BTreeSet::from(["Extra Cheese".to_string()]);
///
/// let price = compute_line_price(Money::from_major(50), &extras, Money::from_major(7), Some("Chips"), &sides);
/// assert_eq!(price, Money::from_major(77));
///
/// // Unknown side: no surcharge, no error
/// let price = compute_line_price(Money::from_major(50), &BTreeSet::new(), Money::from_major(7), Some("Caviar"), &sides);
/// assert_eq!(price, Money::from_major(50));
/// ```
pub fn compute_line_price(
    base_price: Money,
    extras: &BTreeSet<String>,
    extra_unit_price: Money,
    side: Option<&str>,
    side_prices: &BTreeMap<String, Money>,
) -> Money {
    let extras_total = extra_unit_price.multiply_quantity(extras.len() as i64);
    let side_total = side
        .and_then(|name| side_prices.get(name))
        .copied()
        .unwrap_or_default();

    base_price + extras_total + side_total
}

/// Surcharge table used when items are added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceTable {
    pub extra_unit_price: Money,
    pub side_prices: BTreeMap<String, Money>,
}

impl PriceTable {
    pub fn new(extra_unit_price: Money) -> Self {
        PriceTable {
            extra_unit_price,
            side_prices: BTreeMap::new(),
        }
    }

    /// Adds or replaces a side surcharge.
    pub fn with_side(mut self, name: impl Into<String>, price: Money) -> Self {
        self.side_prices.insert(name.into(), price);
        self
    }

    /// Surcharge for a side; `None` when the table does not list it.
    pub fn side_price(&self, name: &str) -> Option<Money> {
        self.side_prices.get(name).copied()
    }

    /// Unit price of `base_price` with `configuration` applied.
    pub fn line_price(&self, base_price: Money, configuration: &Configuration) -> Money {
        compute_line_price(
            base_price,
            configuration.extras(),
            self.extra_unit_price,
            configuration.side(),
            &self.side_prices,
        )
    }
}

/// The shop's current menu surcharges.
impl Default for PriceTable {
    fn default() -> Self {
        PriceTable::new(DEFAULT_EXTRA_PRICE)
            .with_side("Chips", Money::from_major(20))
            .with_side("Salad", Money::from_major(30))
            .with_side("Pap", Money::from_major(15))
            .with_side("Nuggets", Money::from_major(40))
    }
}
