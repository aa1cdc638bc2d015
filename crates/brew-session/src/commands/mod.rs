//! # Commands Module
//!
//! Every operation the mobile client can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── menu.rs     ◄─── Menu browsing, admin menu editing
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── order.rs    ◄─── Checkout, order history, payment confirmation
//! ├── admin.rs    ◄─── Order board, status advance, dashboard totals
//! └── users.rs    ◄─── User list, revoke / restore access
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client                                                                 │
//! │  ──────                                                                 │
//! │  addToCart({ itemId: 'latte', configuration: {...}, quantity: 2 })     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  pub async fn add_to_cart(                                              │
//! │      session: &Session,             ◄── identity + this user's cart    │
//! │      catalog: &dyn CatalogSource,   ◄── only the collaborator it needs │
//! │      request: AddToCartRequest,     ◄── deserialized from the client   │
//! │  ) -> Result<CartResponse, ApiError>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Client receives: CartResponse or { code, message }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the collaborators it needs. Admin commands
//! call [`crate::Session::require_admin`] before anything else.

pub mod admin;
pub mod cart;
pub mod menu;
pub mod order;
pub mod users;

pub use admin::{advance_order, list_orders, order_stats, AdminOrderView};
pub use cart::{
    add_to_cart, clear_cart, get_cart, remove_from_cart, update_cart_item, AddToCartRequest,
    CartResponse,
};
pub use menu::{browse_menu, delete_menu_item, save_menu_item, toggle_item_availability};
pub use order::{checkout, confirm_payment, my_orders, CheckoutRequest};
pub use users::{list_users, set_user_active};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use brew_core::{CatalogItem, Identity, Money};

    use crate::session::Session;
    use crate::state::ConfigState;
    use crate::store::MemoryCatalog;

    pub fn item(id: &str, name: &str, price: i64, category: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            base_price: Money::from_major(price),
            category: category.to_string(),
            is_available: true,
            image: None,
        }
    }

    pub fn catalog() -> MemoryCatalog {
        let mut sold_out = item("scone", "Scone", 18, "Desserts");
        sold_out.is_available = false;

        MemoryCatalog::with_items([
            item("latte", "Latte", 35, "Coffee"),
            item("muffin", "Muffin", 20, "Desserts"),
            item("wrap", "Chicken Wrap", 50, "Sandwiches and Wraps"),
            sold_out,
        ])
    }

    pub fn customer(user_id: &str) -> Session {
        Session::new(Identity::customer(user_id), Arc::new(ConfigState::default()))
    }

    pub fn admin() -> Session {
        Session::new(Identity::admin("admin-1"), Arc::new(ConfigState::default()))
    }
}
