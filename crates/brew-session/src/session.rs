//! # Session
//!
//! One signed-in user: who they are, their cart, and the shop config.
//!
//! A session is created when the auth provider reports a sign-in and
//! dropped on sign-out; the cart goes with it. Nothing about the cart is
//! persisted.

use std::sync::Arc;

use brew_core::{Identity, TransitionPolicy};

use crate::error::ApiError;
use crate::state::{CartState, ConfigState};

#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    cart: CartState,
    config: Arc<ConfigState>,
}

impl Session {
    /// Starts a session with an empty cart.
    pub fn new(identity: Identity, config: Arc<ConfigState>) -> Self {
        tracing::debug!(user_id = %identity.user_id, role = ?identity.role, "Session started");

        Session {
            identity,
            cart: CartState::new(),
            config,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user_id(&self) -> &str {
        &self.identity.user_id
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        self.config.transition_policy
    }

    /// Fails with `FORBIDDEN` unless the session belongs to an admin.
    ///
    /// brew-core performs no authorization of its own; admin-only commands
    /// call this before touching it.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.identity.is_admin() {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.identity.user_id, "Admin command refused");
            Err(ApiError::forbidden("Admin access required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_require_admin() {
        let config = Arc::new(ConfigState::default());

        let admin = Session::new(Identity::admin("a-1"), config.clone());
        assert!(admin.require_admin().is_ok());

        let customer = Session::new(Identity::customer("c-1"), config);
        let err = customer.require_admin().unwrap_err();
        assert!(matches!(err.code, ErrorCode::Forbidden));
    }

    #[test]
    fn test_sessions_do_not_share_carts() {
        let config = Arc::new(ConfigState::default());
        let a = Session::new(Identity::customer("a"), config.clone());
        let b = Session::new(Identity::customer("b"), config);

        a.cart().with_cart_mut(|c| {
            c.add_item(brew_core::CartLine::new(
                "latte",
                "Latte",
                brew_core::Money::from_major(35),
                brew_core::Configuration::new(),
                1,
                &a.config().prices,
            ));
        });

        assert_eq!(a.cart().with_cart(|c| c.line_count()), 1);
        assert!(b.cart().with_cart(|c| c.is_empty()));
    }
}
