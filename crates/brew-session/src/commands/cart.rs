//! # Cart Commands
//!
//! Cart manipulation for the signed-in customer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Screen  │     │  Stored  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                      checkout            │
//! │                   update_cart_item                 (order.rs)          │
//! │                   remove_from_cart                       │              │
//! │                        │                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are addressed by [`LineKey`] everywhere: the item id plus the
//! normalized configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use brew_core::validation::{validate_cart_size, validate_quantity};
use brew_core::{Cart, CartLine, CartTotals, Configuration, CoreError, LineKey, MAX_LINE_QUANTITY};

use crate::error::ApiError;
use crate::session::Session;
use crate::store::CatalogSource;

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// What the item screen submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub item_id: String,
    #[serde(default)]
    pub configuration: Configuration,
    /// Defaults to 1.
    #[serde(default)]
    pub quantity: Option<i64>,
}

pub fn get_cart(session: &Session) -> CartResponse {
    debug!(user_id = %session.user_id(), "get_cart command");
    session.cart().with_cart(|c| CartResponse::from(c))
}

/// Adds an item to the cart.
///
/// ## Behavior
/// - Same item and configuration already in cart: quantity increases
/// - Otherwise: added as a new line
/// - The unit price (base + extras + side) is frozen now and does not
///   follow later menu price changes
///
/// ## Errors
/// - `NOT_FOUND` if the item is not on the menu
/// - `ITEM_UNAVAILABLE` if the item is switched off
/// - `VALIDATION_ERROR` for a bad quantity or a full cart
pub async fn add_to_cart(
    session: &Session,
    catalog: &dyn CatalogSource,
    request: AddToCartRequest,
) -> Result<CartResponse, ApiError> {
    let quantity = request.quantity.unwrap_or(1);
    debug!(item_id = %request.item_id, quantity, "add_to_cart command");

    validate_quantity(quantity)?;

    let item = catalog
        .get_item(request.item_id.trim())
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", &request.item_id))?;

    if !item.is_available {
        return Err(CoreError::ItemUnavailable { name: item.name }.into());
    }

    let line = CartLine::from_catalog(
        &item,
        request.configuration,
        quantity,
        &session.config().prices,
    );
    let key = line.key();

    session.cart().with_cart_mut(|cart| -> Result<CartResponse, ApiError> {
        match cart.line(&key) {
            Some(existing) => validate_quantity(existing.quantity + quantity)?,
            None => validate_cart_size(cart.line_count())?,
        }

        cart.add_item(line);
        debug!(key = %key, total = %cart.compute_total(), "Cart line added");

        Ok(CartResponse::from(&*cart))
    })
}

/// Sets the quantity of one line. Values below 1 land on 1.
pub fn update_cart_item(
    session: &Session,
    key: LineKey,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    let key = key.normalized();
    debug!(key = %key, quantity, "update_cart_item command");

    if quantity > MAX_LINE_QUANTITY {
        validate_quantity(quantity)?;
    }

    Ok(session.cart().with_cart_mut(|cart| {
        log_missing_line(cart, &key);
        cart.update_quantity(&key, quantity);
        CartResponse::from(&*cart)
    }))
}

/// Removes the line with exactly this key.
pub fn remove_from_cart(session: &Session, key: LineKey) -> CartResponse {
    let key = key.normalized();
    debug!(key = %key, "remove_from_cart command");

    session.cart().with_cart_mut(|cart| {
        log_missing_line(cart, &key);
        cart.remove_item(&key);
        CartResponse::from(&*cart)
    })
}

pub fn clear_cart(session: &Session) -> CartResponse {
    debug!(user_id = %session.user_id(), "clear_cart command");

    session.cart().with_cart_mut(|cart| CartResponse::from(&*cart.clear()))
}

/// A stale key from the client leaves the cart unchanged.
fn log_missing_line(cart: &Cart, key: &LineKey) {
    if let Err(err) = cart.require_line(key) {
        debug!(error = %err, "Cart unchanged");
    }
}
