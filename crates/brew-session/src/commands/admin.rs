//! # Admin Order Commands
//!
//! The order board: every order with the statuses it may move to, and
//! the command that moves it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #a1f3  pickup    preparing   R90.00   [ Ready ]                        │
//! │  #77c0  delivery  delivering  R35.00   [ Delivered ]                    │
//! │  #0b9e  (none)    ready       R20.00   (no actions: unknown type)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Buttons come from [`Order::available_transitions`] under the shop's
//! [`brew_core::TransitionPolicy`]. The dashboard cards above the board
//! come from [`order_stats`].

use serde::Serialize;
use tracing::{debug, info};

use brew_core::{Order, OrderStats, OrderStatus};

use crate::error::ApiError;
use crate::session::Session;
use crate::store::OrderStore;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderView {
    pub order: Order,
    pub available_transitions: Vec<OrderStatus>,
}

/// All orders, newest first.
pub async fn list_orders(
    session: &Session,
    store: &dyn OrderStore,
) -> Result<Vec<AdminOrderView>, ApiError> {
    session.require_admin()?;
    debug!("list_orders command");

    let policy = session.transition_policy();
    let views = store
        .list_all()
        .await?
        .into_iter()
        .map(|order| AdminOrderView {
            available_transitions: order.available_transitions(policy),
            order,
        })
        .collect();

    Ok(views)
}

/// Moves an order to `target`.
///
/// ## Errors
/// - `FORBIDDEN` for non-admins
/// - `NOT_FOUND` for an unknown order
/// - `INVALID_TRANSITION` when the shop's policy does not allow the move
/// - `UNKNOWN_FULFILLMENT_TYPE` for orders without a usable type
pub async fn advance_order(
    session: &Session,
    store: &dyn OrderStore,
    order_id: &str,
    target: OrderStatus,
) -> Result<AdminOrderView, ApiError> {
    session.require_admin()?;
    debug!(order_id, %target, "advance_order command");

    let mut order = store
        .get(order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", order_id))?;

    let policy = session.transition_policy();
    let from = order.status();
    let update = order.advance(target, policy)?.status_update();

    store.update_status(order_id, update).await?;

    info!(order_id, %from, to = %target, "Order status changed");
    Ok(AdminOrderView {
        available_transitions: order.available_transitions(policy),
        order,
    })
}

/// Dashboard totals: orders placed, orders delivered and revenue from
/// paid orders.
pub async fn order_stats(session: &Session, store: &dyn OrderStore) -> Result<OrderStats, ApiError> {
    session.require_admin()?;
    debug!("order_stats command");

    let orders = store.list_all().await?;
    Ok(OrderStats::tally(&orders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;

    use crate::commands::fixtures::{admin, customer};
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use crate::store::MemoryOrderStore;
    use brew_core::{
        Cart, CartLine, Configuration, FulfillmentType, Identity, Money, PaymentStatus,
        PaymentUpdate, PriceTable, TransitionPolicy,
    };

    async fn stored_order(store: &MemoryOrderStore, fulfillment: FulfillmentType) -> Order {
        let mut cart = Cart::new();
        cart.add_item(CartLine::new(
            "latte",
            "Latte",
            Money::from_major(35),
            Configuration::new(),
            1,
            &PriceTable::default(),
        ));
        let order =
            Order::from_cart(&cart, "c-1", fulfillment, Some("1 Main Rd"), Utc::now()).unwrap();
        store.insert(&order).await.unwrap();
        order
    }

    fn permissive_admin() -> Session {
        let config = ConfigState {
            transition_policy: TransitionPolicy::Permissive,
            ..ConfigState::default()
        };
        Session::new(Identity::admin("admin-2"), Arc::new(config))
    }

    #[tokio::test]
    async fn test_list_orders_with_transitions() {
        let store = MemoryOrderStore::new();
        stored_order(&store, FulfillmentType::Pickup).await;
        stored_order(&store, FulfillmentType::Delivery).await;

        let views = list_orders(&admin(), &store).await.unwrap();

        assert_eq!(views.len(), 2);
        for view in &views {
            let expected = match view.order.fulfillment_type() {
                FulfillmentType::Pickup => OrderStatus::Ready,
                _ => OrderStatus::Delivering,
            };
            assert_eq!(view.available_transitions, vec![expected]);
        }
    }

    #[tokio::test]
    async fn test_admin_only() {
        let store = MemoryOrderStore::new();
        let order = stored_order(&store, FulfillmentType::Pickup).await;
        let customer = customer("c-1");

        let err = list_orders(&customer, &store).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = advance_order(&customer, &store, order.id(), OrderStatus::Ready)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(
            store.get(order.id()).await.unwrap().unwrap().status(),
            OrderStatus::Preparing
        );
    }

    #[tokio::test]
    async fn test_advance_writes_status() {
        let store = MemoryOrderStore::new();
        let order = stored_order(&store, FulfillmentType::Delivery).await;
        let admin = admin();

        let view = advance_order(&admin, &store, order.id(), OrderStatus::Delivering)
            .await
            .unwrap();
        assert_eq!(view.available_transitions, vec![OrderStatus::Delivered]);

        advance_order(&admin, &store, order.id(), OrderStatus::Delivered)
            .await
            .unwrap();
        let stored = store.get(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Delivered);

        let err = advance_order(&admin, &store, order.id(), OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[tokio::test]
    async fn test_policy_comes_from_config() {
        let store = MemoryOrderStore::new();
        let order = stored_order(&store, FulfillmentType::Pickup).await;

        let err = advance_order(&admin(), &store, order.id(), OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);

        let view = advance_order(&permissive_admin(), &store, order.id(), OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(view.order.status(), OrderStatus::Delivered);
        assert!(view.available_transitions.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_fulfillment_is_display_only() {
        let store = MemoryOrderStore::new();
        let order = stored_order(&store, FulfillmentType::Pickup).await;
        let mut legacy = serde_json::to_value(&order).unwrap();
        legacy["fulfillmentType"] = serde_json::Value::Null;
        store.insert_document(order.id(), legacy).await;

        let views = list_orders(&admin(), &store).await.unwrap();
        assert_eq!(views[0].order.fulfillment_type(), FulfillmentType::Unknown);
        assert!(views[0].available_transitions.is_empty());

        let err = advance_order(&admin(), &store, order.id(), OrderStatus::Ready)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownFulfillmentType);
    }

    #[tokio::test]
    async fn test_advance_missing_order() {
        let err = advance_order(&admin(), &MemoryOrderStore::new(), "ghost", OrderStatus::Ready)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_first_release_orders_on_board() {
        let store = MemoryOrderStore::new();
        let order = stored_order(&store, FulfillmentType::Delivery).await;
        store
            .insert_document(
                "first-release",
                serde_json::json!({
                    "userId": "c-1",
                    "orderType": "pickup",
                    "status": "preparing",
                    "totalAmount": 9000,
                }),
            )
            .await;

        let views = list_orders(&admin(), &store).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].order.id(), order.id());
        assert_eq!(views[1].order.id(), "first-release");
        assert_eq!(views[1].available_transitions, vec![OrderStatus::Ready]);

        let view = advance_order(&admin(), &store, "first-release", OrderStatus::Ready)
            .await
            .unwrap();
        assert_eq!(view.order.fulfillment_type(), FulfillmentType::Pickup);
        assert_eq!(
            store.get("first-release").await.unwrap().unwrap().status(),
            OrderStatus::Ready
        );
    }

    #[tokio::test]
    async fn test_order_stats() {
        let store = MemoryOrderStore::new();
        let paid = stored_order(&store, FulfillmentType::Pickup).await;
        stored_order(&store, FulfillmentType::Delivery).await;
        store
            .update_payment(
                paid.id(),
                PaymentUpdate {
                    payment_status: PaymentStatus::Paid,
                    paid_at: Utc::now(),
                },
            )
            .await
            .unwrap();
        let admin = permissive_admin();
        advance_order(&admin, &store, paid.id(), OrderStatus::Delivered)
            .await
            .unwrap();

        let stats = order_stats(&admin, &store).await.unwrap();

        assert_eq!(stats.placed_orders, 2);
        assert_eq!(stats.delivered_orders, 1);
        assert_eq!(stats.paid_orders, 1);
        assert_eq!(stats.revenue, Money::from_major(35));

        let err = order_stats(&customer("c-1"), &store).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
