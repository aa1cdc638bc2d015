//! # Orders
//!
//! An [`Order`] is a frozen snapshot of a cart taken at checkout.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cart ──from_cart()──► Order { status: preparing, payment: unpaid }    │
//! │                           │                                             │
//! │           ┌───────────────┴────────────────┐                            │
//! │           ▼                                ▼                            │
//! │   advance(target)  (admin)        record_payment(outcome) (customer)   │
//! │   → StatusUpdate { status }       → PaymentUpdate { paid, paidAt }     │
//! │           │                                │                            │
//! │           └──────────► order store ◄───────┘                            │
//! │                     (external, last write wins)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items and total are fixed at creation; only `status` and
//! `payment_status` ever change, and only through the methods below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::status::{self, TransitionPolicy};
use crate::types::{FulfillmentType, OrderStatus, PaymentStatus};
use crate::validation::validate_delivery_address;

// =============================================================================
// Partial Updates
// =============================================================================

/// The write the store applies after a successful [`Order::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// The write the store applies after a successful [`Order::record_payment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentUpdate {
    pub payment_status: PaymentStatus,
    #[ts(as = "String")]
    pub paid_at: DateTime<Utc>,
}

/// Result reported by the payment provider's redirect.
///
/// Taken at face value: there is no server-side verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentOutcome {
    Success,
    Failure,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    id: String,
    user_id: String,
    #[serde(default)]
    items: Vec<CartLine>,
    #[serde(default)]
    total_amount: Money,
    /// Records written by the first app release use `orderType`.
    #[serde(default, alias = "orderType")]
    fulfillment_type: FulfillmentType,
    #[serde(default)]
    delivery_address: Option<String>,
    #[serde(default)]
    status: OrderStatus,
    #[serde(default)]
    payment_status: PaymentStatus,
    /// Missing on the oldest records, which then sort last.
    #[serde(default)]
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    paid_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Snapshots `cart` into a new order.
    ///
    /// ## Rules
    /// - The cart must not be empty
    /// - Fulfillment must be pickup or delivery
    /// - Delivery needs an address; pickup ignores one
    ///
    /// The cart itself is left alone. Clearing it after the order is
    /// safely stored is the caller's job.
    pub fn from_cart(
        cart: &Cart,
        user_id: impl Into<String>,
        fulfillment_type: FulfillmentType,
        delivery_address: Option<&str>,
        now: DateTime<Utc>,
    ) -> CoreResult<Order> {
        let id = Uuid::new_v4().to_string();

        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let delivery_address = match fulfillment_type {
            FulfillmentType::Unknown => {
                return Err(CoreError::UnknownFulfillmentType { order_id: id });
            }
            FulfillmentType::Pickup => None,
            FulfillmentType::Delivery => {
                let address = delivery_address.unwrap_or_default();
                validate_delivery_address(address)?;
                Some(address.trim().to_string())
            }
        };

        Ok(Order {
            id,
            user_id: user_id.into(),
            items: cart.lines().to_vec(),
            total_amount: cart.compute_total(),
            fulfillment_type,
            delivery_address,
            status: OrderStatus::Preparing,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            paid_at: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn fulfillment_type(&self) -> FulfillmentType {
        self.fulfillment_type
    }

    pub fn delivery_address(&self) -> Option<&str> {
        self.delivery_address.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Moves the order to `target`.
    ///
    /// ## Errors
    /// - [`CoreError::UnknownFulfillmentType`] when the order has no usable
    ///   fulfillment type
    /// - [`CoreError::InvalidTransition`] when `policy` does not allow
    ///   `status → target`, and always once the order is delivered
    pub fn advance(
        &mut self,
        target: OrderStatus,
        policy: TransitionPolicy,
    ) -> CoreResult<&mut Self> {
        if !self.fulfillment_type.is_known() {
            return Err(CoreError::UnknownFulfillmentType {
                order_id: self.id.clone(),
            });
        }

        if !status::can_transition(self.fulfillment_type, self.status, target, policy) {
            return Err(CoreError::InvalidTransition {
                order_id: self.id.clone(),
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        Ok(self)
    }

    /// The partial record describing the current status.
    pub fn status_update(&self) -> StatusUpdate {
        StatusUpdate {
            status: self.status,
        }
    }

    /// Statuses an admin may move this order to right now.
    pub fn available_transitions(&self, policy: TransitionPolicy) -> Vec<OrderStatus> {
        status::allowed_targets(self.fulfillment_type, self.status, policy)
    }

    /// Records the payment provider's verdict.
    ///
    /// An order is settled at most once. Independent of the order status:
    /// a delivered order can still be paid.
    pub fn record_payment(
        &mut self,
        outcome: PaymentOutcome,
        at: DateTime<Utc>,
    ) -> CoreResult<PaymentUpdate> {
        if self.is_paid() {
            return Err(CoreError::PaymentAlreadySettled {
                order_id: self.id.clone(),
            });
        }

        if outcome == PaymentOutcome::Failure {
            return Err(CoreError::PaymentDeclined {
                order_id: self.id.clone(),
            });
        }

        self.payment_status = PaymentStatus::Paid;
        self.paid_at = Some(at);

        Ok(PaymentUpdate {
            payment_status: PaymentStatus::Paid,
            paid_at: at,
        })
    }
}

// =============================================================================
// Dashboard Figures
// =============================================================================

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderStats {
    pub placed_orders: usize,
    pub delivered_orders: usize,
    pub paid_orders: usize,
    /// Σ total of paid orders. Unpaid orders count as placed only.
    pub revenue: Money,
}

impl OrderStats {
    pub fn tally<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(OrderStats::default(), |mut stats, order| {
            stats.placed_orders += 1;
            if order.status == OrderStatus::Delivered {
                stats.delivered_orders += 1;
            }
            if order.is_paid() {
                stats.paid_orders += 1;
                stats.revenue += order.total_amount;
            }
            stats
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Configuration;
    use crate::error::ValidationError;
    use crate::pricing::PriceTable;

    fn cart_with(lines: &[(&str, i64, i64)]) -> Cart {
        let prices = PriceTable::default();
        let mut cart = Cart::new();
        for (id, unit, qty) in lines {
            cart.add_item(CartLine::new(
                *id,
                id.to_uppercase(),
                Money::from_major(*unit),
                Configuration::new(),
                *qty,
                &prices,
            ));
        }
        cart
    }

    fn pickup_order() -> Order {
        Order::from_cart(
            &cart_with(&[("latte", 35, 2), ("muffin", 20, 1)]),
            "user-1",
            FulfillmentType::Pickup,
            None,
            Utc::now(),
        )
        .unwrap()
    }

    fn delivery_order() -> Order {
        Order::from_cart(
            &cart_with(&[("latte", 35, 1)]),
            "user-1",
            FulfillmentType::Delivery,
            Some(" 12 Long Street "),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_from_cart_snapshot() {
        let order = pickup_order();

        assert_eq!(order.total_amount(), Money::from_major(90));
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.status(), OrderStatus::Preparing);
        assert_eq!(order.payment_status(), PaymentStatus::Unpaid);
        assert!(order.delivery_address().is_none());
        assert!(Uuid::parse_str(order.id()).is_ok());
    }

    #[test]
    fn test_snapshot_survives_cart_changes() {
        let mut cart = cart_with(&[("latte", 35, 1)]);
        let order =
            Order::from_cart(&cart, "u", FulfillmentType::Pickup, None, Utc::now()).unwrap();

        cart.clear();

        assert_eq!(order.items().len(), 1);
        assert_eq!(order.total_amount(), Money::from_major(35));
    }

    #[test]
    fn test_from_cart_rejections() {
        let now = Utc::now();

        assert_eq!(
            Order::from_cart(&Cart::new(), "u", FulfillmentType::Pickup, None, now),
            Err(CoreError::EmptyCart)
        );

        let cart = cart_with(&[("latte", 35, 1)]);
        assert!(matches!(
            Order::from_cart(&cart, "u", FulfillmentType::Unknown, None, now),
            Err(CoreError::UnknownFulfillmentType { .. })
        ));
        assert!(matches!(
            Order::from_cart(&cart, "u", FulfillmentType::Delivery, Some("  "), now),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_delivery_address_trimmed() {
        assert_eq!(delivery_order().delivery_address(), Some("12 Long Street"));
    }

    #[test]
    fn test_pickup_walks_its_flow() {
        let mut order = pickup_order();

        order.advance(OrderStatus::Ready, TransitionPolicy::Strict).unwrap();
        assert_eq!(order.status_update().status, OrderStatus::Ready);

        order.advance(OrderStatus::Delivered, TransitionPolicy::Strict).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn test_delivery_walks_its_flow() {
        let mut order = delivery_order();

        assert!(order.advance(OrderStatus::Ready, TransitionPolicy::Strict).is_err());
        order
            .advance(OrderStatus::Delivering, TransitionPolicy::Strict)
            .unwrap()
            .advance(OrderStatus::Delivered, TransitionPolicy::Strict)
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    /// `ready → preparing` on a pickup order: rejected by the default
    /// strict policy, accepted by the permissive one.
    #[test]
    fn test_backward_move_depends_on_policy() {
        let mut strict = pickup_order();
        strict.advance(OrderStatus::Ready, TransitionPolicy::Strict).unwrap();
        let err = strict
            .advance(OrderStatus::Preparing, TransitionPolicy::default())
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                order_id: strict.id().to_string(),
                from: OrderStatus::Ready,
                to: OrderStatus::Preparing,
            }
        );
        assert_eq!(strict.status(), OrderStatus::Ready);

        let mut loose = pickup_order();
        loose.advance(OrderStatus::Ready, TransitionPolicy::Permissive).unwrap();
        loose
            .advance(OrderStatus::Preparing, TransitionPolicy::Permissive)
            .unwrap();
        assert_eq!(loose.status(), OrderStatus::Preparing);
    }

    #[test]
    fn test_delivered_is_locked() {
        let mut order = pickup_order();
        order
            .advance(OrderStatus::Delivered, TransitionPolicy::Permissive)
            .unwrap();

        for policy in [TransitionPolicy::Strict, TransitionPolicy::Permissive] {
            for target in [
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Delivering,
                OrderStatus::Delivered,
            ] {
                assert!(matches!(
                    order.advance(target, policy),
                    Err(CoreError::InvalidTransition { .. })
                ));
            }
        }
        assert!(order.available_transitions(TransitionPolicy::Permissive).is_empty());
    }

    #[test]
    fn test_unknown_fulfillment_is_display_only() {
        let mut stored = serde_json::to_value(pickup_order()).unwrap();
        stored
            .as_object_mut()
            .unwrap()
            .remove("fulfillmentType");
        let mut order: Order = serde_json::from_value(stored).unwrap();

        assert_eq!(order.fulfillment_type(), FulfillmentType::Unknown);
        assert!(order.available_transitions(TransitionPolicy::Permissive).is_empty());
        assert!(matches!(
            order.advance(OrderStatus::Ready, TransitionPolicy::Permissive),
            Err(CoreError::UnknownFulfillmentType { .. })
        ));
    }

    #[test]
    fn test_reads_first_release_records() {
        let stored = serde_json::json!({
            "id": "o-legacy",
            "userId": "user-1",
            "orderType": "pickup",
            "status": "preparing",
            "totalAmount": 9000,
        });
        let mut order: Order = serde_json::from_value(stored).unwrap();

        assert_eq!(order.fulfillment_type(), FulfillmentType::Pickup);
        assert_eq!(order.total_amount(), Money::from_major(90));
        assert!(order.items().is_empty());
        assert_eq!(order.created_at(), DateTime::<Utc>::default());

        order.advance(OrderStatus::Ready, TransitionPolicy::Strict).unwrap();
        assert_eq!(order.status(), OrderStatus::Ready);

        // Written back under the current field name.
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["fulfillmentType"], "pickup");
    }

    #[test]
    fn test_payment_settles_once() {
        let mut order = pickup_order();
        let at = Utc::now();

        assert!(matches!(
            order.record_payment(PaymentOutcome::Failure, at),
            Err(CoreError::PaymentDeclined { .. })
        ));
        assert!(!order.is_paid());

        let update = order.record_payment(PaymentOutcome::Success, at).unwrap();
        assert_eq!(update.payment_status, PaymentStatus::Paid);
        assert_eq!(order.paid_at(), Some(at));

        assert!(matches!(
            order.record_payment(PaymentOutcome::Success, Utc::now()),
            Err(CoreError::PaymentAlreadySettled { .. })
        ));
        assert_eq!(order.paid_at(), Some(at));
    }

    #[test]
    fn test_payment_independent_of_status() {
        let mut order = pickup_order();
        order
            .advance(OrderStatus::Delivered, TransitionPolicy::Permissive)
            .unwrap();
        assert!(order.record_payment(PaymentOutcome::Success, Utc::now()).is_ok());
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn test_stats_count_paid_revenue_only() {
        let mut paid = pickup_order();
        paid.record_payment(PaymentOutcome::Success, Utc::now()).unwrap();
        paid.advance(OrderStatus::Ready, TransitionPolicy::Strict).unwrap();
        paid.advance(OrderStatus::Delivered, TransitionPolicy::Strict).unwrap();

        let unpaid = delivery_order();

        let stats = OrderStats::tally([&paid, &unpaid]);

        assert_eq!(stats.placed_orders, 2);
        assert_eq!(stats.delivered_orders, 1);
        assert_eq!(stats.paid_orders, 1);
        assert_eq!(stats.revenue, Money::from_major(90));
        assert_eq!(OrderStats::tally(Vec::<Order>::new().iter()), OrderStats::default());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(delivery_order()).unwrap();
        assert_eq!(json["fulfillmentType"], "delivery");
        assert_eq!(json["status"], "preparing");
        assert_eq!(json["paymentStatus"], "unpaid");
        assert_eq!(json["totalAmount"], 3500);
    }
}
