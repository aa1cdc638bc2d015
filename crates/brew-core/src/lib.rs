//! # brew-core: Pure Ordering Logic for Brewline
//!
//! Everything in this crate is a deterministic function over plain values.
//! Fetching menu items, persisting orders and talking to the payment
//! provider all happen in the caller (see `brew-session`).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brewline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile client (TypeScript)                      │   │
//! │  │   Menu ──► Item options ──► Cart ──► Checkout ──► Profile       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 brew-session (commands)                         │   │
//! │  │   add_to_cart, checkout, confirm_payment, advance_order ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │ pricing │ │  cart   │ │ status  │ │  order  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Catalog records, fulfillment/status enums, identity
//! - [`pricing`] - Line price computation (base + extras + side)
//! - [`cart`] - Cart aggregation keyed by [`cart::LineKey`]
//! - [`status`] - Per-fulfillment status flows and transition policy
//! - [`order`] - Checkout snapshot, status advance, payment settlement
//! - [`validation`] - Input validation for the session layer
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::cart::{Cart, CartLine, Configuration};
//! use brew_core::money::Money;
//! use brew_core::pricing::PriceTable;
//!
//! let table = PriceTable::default();
//! let config = Configuration::new().with_side("Chips");
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartLine::new("toastie", "Cheese Toastie", Money::from_major(45), config, 2, &table));
//!
//! // (R45 + R20 chips) × 2
//! assert_eq!(cart.compute_total(), Money::from_major(130));
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod status;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartLine, CartTotals, Configuration, LineKey};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderStats, PaymentOutcome, PaymentUpdate, StatusUpdate};
pub use pricing::PriceTable;
pub use status::TransitionPolicy;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct lines in one cart.
pub const MAX_CART_LINES: usize = 50;

/// Maximum quantity of a single line.
///
/// Guards against fat-fingered quantities on the item screen.
pub const MAX_LINE_QUANTITY: i64 = 99;

/// Highest menu price the admin editor accepts (R100 000.00).
///
/// Keeps `price × quantity + surcharges` far from `i64` overflow.
pub const MAX_PRICE_CENTS: i64 = 10_000_000;

/// Menu categories the admin editor accepts.
pub const MENU_CATEGORIES: &[&str] = &[
    "Coffee",
    "Tea",
    "Sandwiches and Wraps",
    "Desserts",
    "Cold Drinks",
    "Extras",
];
