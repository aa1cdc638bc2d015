//! # Cart State
//!
//! Holds the current cart for one session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because the client may fire
//! several commands at once (a quantity tap while the cart screen is
//! still loading). The lock is held only for the closure passed to
//! [`CartState::with_cart`] / [`CartState::with_cart_mut`], never across
//! an `.await`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client Action           Command                 Cart Change            │
//! │  ─────────────           ───────                 ───────────            │
//! │  Add to Cart ──────────► add_to_cart() ────────► merge or push line     │
//! │  − / + stepper ────────► update_cart_item() ───► quantity (min 1)       │
//! │  Remove ───────────────► remove_from_cart() ───► drop exact line        │
//! │  Place order ──────────► checkout() ───────────► clear (after store)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use brew_core::Cart;

/// Session-scoped cart owner.
///
/// Cloning shares the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        // Cart operations cannot leave the cart half-written, so a poisoned
        // lock still guards a consistent value.
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Copy of the cart as it is right now.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::{CartLine, Configuration, Money, PriceTable};

    fn line(id: &str) -> CartLine {
        CartLine::new(
            id,
            id,
            Money::from_major(20),
            Configuration::new(),
            1,
            &PriceTable::default(),
        )
    }

    #[test]
    fn test_clones_share_cart() {
        let state = CartState::new();
        let other = state.clone();

        state.with_cart_mut(|c| {
            c.add_item(line("latte"));
        });

        assert_eq!(other.with_cart(|c| c.line_count()), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let state = CartState::new();
        state.with_cart_mut(|c| {
            c.add_item(line("latte"));
        });

        let snapshot = state.snapshot();
        state.with_cart_mut(|c| {
            c.clear();
        });

        assert_eq!(snapshot.line_count(), 1);
        assert!(state.with_cart(|c| c.is_empty()));
    }
}
