//! # Order Commands
//!
//! Checkout, order history and payment confirmation for customers.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout({ fulfillmentType: 'delivery', deliveryAddress: '...' })     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  1. Snapshot the cart (lock released right away)                        │
//! │  2. Order::from_cart: empty cart / unknown fulfillment / address        │
//! │  3. OrderStore::insert                                                  │
//! │         │                                                               │
//! │         ├── store error ──► cart untouched, error returned              │
//! │         ▼                                                               │
//! │  4. Clear the cart                                                      │
//! │  5. Client opens the payment redirect; its verdict comes back through   │
//! │     confirm_payment                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use brew_core::{FulfillmentType, Order, PaymentOutcome};

use crate::error::ApiError;
use crate::session::Session;
use crate::store::OrderStore;

/// What the checkout screen submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub fulfillment_type: FulfillmentType,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

/// Places an order from the session's cart.
///
/// The cart is cleared only after the order store accepted the order.
/// Items added while the order was being stored are cleared with it.
pub async fn checkout(
    session: &Session,
    store: &dyn OrderStore,
    request: CheckoutRequest,
) -> Result<Order, ApiError> {
    debug!(
        user_id = %session.user_id(),
        fulfillment = %request.fulfillment_type,
        "checkout command"
    );

    let cart = session.cart().snapshot();
    let order = Order::from_cart(
        &cart,
        session.user_id(),
        request.fulfillment_type,
        request.delivery_address.as_deref(),
        Utc::now(),
    )?;

    store.insert(&order).await?;

    session.cart().with_cart_mut(|c| {
        c.clear();
    });

    info!(
        order_id = %order.id(),
        user_id = %order.user_id(),
        total = %order.total_amount(),
        lines = order.items().len(),
        "Order placed"
    );

    Ok(order)
}

/// The signed-in user's orders, newest first.
pub async fn my_orders(session: &Session, store: &dyn OrderStore) -> Result<Vec<Order>, ApiError> {
    debug!(user_id = %session.user_id(), "my_orders command");

    Ok(store.list_for_user(session.user_id()).await?)
}

/// Applies the payment provider's verdict to one of the user's orders.
///
/// ## Errors
/// - `NOT_FOUND` for an unknown order
/// - `FORBIDDEN` if the order belongs to someone else
/// - `PAYMENT_ERROR` if the order is already paid or the payment failed
pub async fn confirm_payment(
    session: &Session,
    store: &dyn OrderStore,
    order_id: &str,
    outcome: PaymentOutcome,
) -> Result<Order, ApiError> {
    debug!(order_id, ?outcome, "confirm_payment command");

    let mut order = store
        .get(order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", order_id))?;

    if order.user_id() != session.user_id() {
        warn!(order_id, user_id = %session.user_id(), "Payment confirmation for another user's order");
        return Err(ApiError::forbidden("Order belongs to another user"));
    }

    let update = order.record_payment(outcome, Utc::now())?;
    store.update_payment(order_id, update).await?;

    info!(order_id, total = %order.total_amount(), "Order paid");
    Ok(order)
}
