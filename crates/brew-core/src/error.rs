//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - Cart / order rule violations                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  brew-session errors                                                   │
//! │  ├── StoreError       - Order store / catalog failures                 │
//! │  └── ApiError         - What the mobile client sees (serialized)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. The worst outcome is a rejected transition or
//! a cart mutation that did nothing.

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The requested status is not reachable from the order's current status.
    ///
    /// ## When This Occurs
    /// - Target status is not part of the order's fulfillment flow
    ///   (e.g. `delivering` on a pickup order)
    /// - The order is already `delivered`
    /// - Strict policy and the target is not the immediate successor
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The order has no recognised fulfillment type; it is display-only
    /// until corrected in the store.
    #[error("Order {order_id} has no recognised fulfillment type")]
    UnknownFulfillmentType { order_id: String },

    /// A cart line key that is not in the cart.
    #[error("No cart line matches {key}")]
    ConfigurationMismatch { key: String },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Catalog item exists but is switched off.
    #[error("{name} is not available right now")]
    ItemUnavailable { name: String },

    /// A second payment confirmation for an order that is already paid.
    #[error("Order {order_id} is already paid")]
    PaymentAlreadySettled { order_id: String },

    /// The payment provider reported failure.
    #[error("Payment for order {order_id} was not completed")]
    PaymentDeclined { order_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] before any cart or order logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
