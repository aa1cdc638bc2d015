//! # Cart Aggregator
//!
//! The in-memory cart for one customer session.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineKey = item_id + normalized Configuration                           │
//! │                                                                         │
//! │   "toastie" + {extras: [Cheese, Sauce], side: Chips, drink: -}         │
//! │   "toastie" + {extras: [Sauce, Cheese], side: Chips, drink: -}  ══ same │
//! │   "toastie" + {extras: [Sauce],         side: Chips, drink: -}  ≠ diff  │
//! │                                                                         │
//! │  add_item        → merges into the line with the same key              │
//! │  remove_item     → removes exactly that key                            │
//! │  update_quantity → targets exactly that key                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! A line's `line_unit_price` is computed once, when the line is built.
//! Later catalog price changes never reach lines already in the cart, and
//! merging more of the same line does not re-price it.
//!
//! ## Missing keys
//! `remove_item` and `update_quantity` on a key that is not in the cart
//! leave the cart untouched. Callers that need to know use
//! [`Cart::require_line`], which reports
//! [`CoreError::ConfigurationMismatch`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::PriceTable;
use crate::types::CatalogItem;

// =============================================================================
// Configuration
// =============================================================================

/// The options a customer picked for an item.
///
/// Extras are a set: selection order and repeated picks do not matter.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Configuration {
    #[serde(default)]
    extras: BTreeSet<String>,
    #[serde(default)]
    side: Option<String>,
    #[serde(default)]
    drink: Option<String>,
}

impl Configuration {
    /// No extras, no side, no drink.
    pub fn new() -> Self {
        Configuration::default()
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extras.insert(extra.into());
        self.normalized()
    }

    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
        self.normalized()
    }

    pub fn with_drink(mut self, drink: impl Into<String>) -> Self {
        self.drink = Some(drink.into());
        self.normalized()
    }

    pub fn extras(&self) -> &BTreeSet<String> {
        &self.extras
    }

    pub fn side(&self) -> Option<&str> {
        self.side.as_deref()
    }

    pub fn drink(&self) -> Option<&str> {
        self.drink.as_deref()
    }

    /// Trims every name and drops blank ones.
    ///
    /// Client payloads are deserialized as-is, so anything that compares
    /// configurations goes through this first.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Configuration {
            extras: self
                .extras
                .into_iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
            side: clean(self.side),
            drink: clean(self.drink),
        }
    }
}

// =============================================================================
// Line Key
// =============================================================================

/// Identity of a cart line: the catalog item plus its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineKey {
    item_id: String,
    #[serde(default)]
    configuration: Configuration,
}

impl LineKey {
    pub fn new(item_id: impl Into<String>, configuration: Configuration) -> Self {
        LineKey {
            item_id: item_id.into().trim().to_string(),
            configuration: configuration.normalized(),
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Re-applies normalization to a key that arrived over the wire.
    pub fn normalized(self) -> Self {
        LineKey::new(self.item_id, self.configuration)
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extras: Vec<&str> = self.configuration.extras.iter().map(String::as_str).collect();
        write!(
            f,
            "{}[extras={};side={};drink={}]",
            self.item_id,
            extras.join("+"),
            self.configuration.side().unwrap_or("-"),
            self.configuration.drink().unwrap_or("-"),
        )
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One row in the cart.
///
/// `name`, `image` and both prices are snapshots taken when the line was
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub image: Option<String>,
    pub unit_base_price: Money,
    pub quantity: i64,
    pub configuration: Configuration,
    /// Base price plus extras and side surcharges.
    pub line_unit_price: Money,
}

impl CartLine {
    /// Builds a line and freezes its unit price from `prices`.
    ///
    /// Quantity and price are expected to be validated already
    /// (see [`crate::validation`]).
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        unit_base_price: Money,
        configuration: Configuration,
        quantity: i64,
        prices: &PriceTable,
    ) -> Self {
        let configuration = configuration.normalized();
        let line_unit_price = prices.line_price(unit_base_price, &configuration);

        CartLine {
            item_id: item_id.into().trim().to_string(),
            name: name.into(),
            image: None,
            unit_base_price,
            quantity,
            configuration,
            line_unit_price,
        }
    }

    /// Builds a line from a catalog record, copying its name, image and
    /// current base price.
    pub fn from_catalog(
        item: &CatalogItem,
        configuration: Configuration,
        quantity: i64,
        prices: &PriceTable,
    ) -> Self {
        CartLine {
            image: item.image.clone(),
            ..CartLine::new(
                item.id.clone(),
                item.name.clone(),
                item.base_price,
                configuration,
                quantity,
                prices,
            )
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.item_id.clone(), self.configuration.clone())
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.item_id == key.item_id && self.configuration == key.configuration
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.line_unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - No two lines share a [`LineKey`]
/// - Every quantity is ≥ 1
/// - Lines keep insertion order (display only; pricing ignores it)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds a line, or merges it into the existing line with the same key.
    ///
    /// On merge only the quantity changes; the existing line keeps its
    /// frozen price.
    pub fn add_item(&mut self, line: CartLine) -> &mut Self {
        let key = line.key();

        match self.lines.iter().position(|l| l.matches(&key)) {
            Some(index) => self.lines[index].quantity += line.quantity,
            None => self.lines.push(CartLine {
                item_id: key.item_id,
                configuration: key.configuration,
                ..line
            }),
        }

        self
    }

    /// Removes the line with exactly this key. Missing keys are a no-op.
    pub fn remove_item(&mut self, key: &LineKey) -> &mut Self {
        self.lines.retain(|l| !l.matches(key));
        self
    }

    /// Sets a line's quantity, never going below 1.
    ///
    /// Removing a line is [`Cart::remove_item`]'s job; a zero or negative
    /// quantity here lands on 1. Missing keys are a no-op.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> &mut Self {
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(key)) {
            line.quantity = quantity.max(1);
        }
        self
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> &mut Self {
        self.lines.clear();
        self
    }

    /// Σ line_unit_price × quantity.
    pub fn compute_total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(key))
    }

    /// Like [`Cart::line`], but a missing key is an error.
    pub fn require_line(&self, key: &LineKey) -> CoreResult<&CartLine> {
        self.line(key).ok_or_else(|| CoreError::ConfigurationMismatch {
            key: key.to_string(),
        })
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart summary for the cart badge and checkout screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.compute_total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
