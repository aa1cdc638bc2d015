//! # Order Status Flows
//!
//! Each fulfillment type has a fixed, ordered list of statuses:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pickup    preparing ──► ready ──────► delivered                        │
//! │  delivery  preparing ──► delivering ─► delivered                        │
//! │  unknown   (no flow: display only until the record is corrected)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `delivered` is terminal under every policy.
//!
//! ## Policies
//! - [`TransitionPolicy::Strict`] (default): only the immediate successor
//!   is reachable. No skipping, no going back, no same-state writes.
//! - [`TransitionPolicy::Permissive`]: any status in the flow is reachable
//!   from any non-terminal status. This is how the admin screen behaved
//!   originally, where a row of buttons wrote whichever label was tapped.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{FulfillmentType, OrderStatus};

const PICKUP_FLOW: &[OrderStatus] = &[
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Delivered,
];

const DELIVERY_FLOW: &[OrderStatus] = &[
    OrderStatus::Preparing,
    OrderStatus::Delivering,
    OrderStatus::Delivered,
];

/// How strictly `advance` checks the requested status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TransitionPolicy {
    #[default]
    Strict,
    Permissive,
}

impl TransitionPolicy {
    /// Parses a config value (`strict` / `permissive`, any case).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Some(TransitionPolicy::Strict),
            "permissive" | "loose" => Some(TransitionPolicy::Permissive),
            _ => None,
        }
    }
}

/// The ordered statuses for a fulfillment type. Empty for `Unknown`.
pub fn flow(fulfillment: FulfillmentType) -> &'static [OrderStatus] {
    match fulfillment {
        FulfillmentType::Pickup => PICKUP_FLOW,
        FulfillmentType::Delivery => DELIVERY_FLOW,
        FulfillmentType::Unknown => &[],
    }
}

/// The status after `current` in the flow, if any.
pub fn next_status(fulfillment: FulfillmentType, current: OrderStatus) -> Option<OrderStatus> {
    let statuses = flow(fulfillment);
    let position = statuses.iter().position(|s| *s == current)?;
    statuses.get(position + 1).copied()
}

/// Whether `current → target` is allowed.
pub fn can_transition(
    fulfillment: FulfillmentType,
    current: OrderStatus,
    target: OrderStatus,
    policy: TransitionPolicy,
) -> bool {
    if current.is_terminal() {
        return false;
    }

    match policy {
        TransitionPolicy::Strict => next_status(fulfillment, current) == Some(target),
        TransitionPolicy::Permissive => flow(fulfillment).contains(&target),
    }
}

/// Every status reachable from `current`, in flow order.
///
/// This is what the admin order list offers as buttons.
pub fn allowed_targets(
    fulfillment: FulfillmentType,
    current: OrderStatus,
    policy: TransitionPolicy,
) -> Vec<OrderStatus> {
    flow(fulfillment)
        .iter()
        .copied()
        .filter(|target| can_transition(fulfillment, current, *target, policy))
        .collect()
}
