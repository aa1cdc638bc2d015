//! # brew-session
//!
//! Session layer for the Brewline ordering app. It owns the "current cart"
//! of one signed-in user and exposes the command functions the mobile
//! client calls.
//!
//! ## Module Organization
//! ```text
//! brew_session/
//! ├── lib.rs          ◄─── You are here (logging setup, exports)
//! ├── session.rs      ◄─── Session: identity + cart + config
//! ├── state/
//! │   ├── cart.rs     ◄─── CartState (the only owner of a session's cart)
//! │   └── config.rs   ◄─── ConfigState (prices, policy, currency)
//! ├── store/
//! │   ├── mod.rs      ◄─── CatalogSource / OrderStore / UserDirectory, StoreError
//! │   └── memory.rs   ◄─── In-memory implementations
//! ├── commands/
//! │   ├── menu.rs     ◄─── Browsing + admin menu editing
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── order.rs    ◄─── Checkout, history, payment confirmation
//! │   ├── admin.rs    ◄─── Order list, status advance, dashboard totals
//! │   └── users.rs    ◄─── User list, revoke / restore access
//! └── error.rs        ◄─── ApiError returned by every command
//! ```
//!
//! ## No Ambient Cart
//! The cart is not a global. Every command that touches it receives the
//! [`Session`] that owns it, and a session's cart dies with the session.

pub mod commands;
pub mod error;
pub mod session;
pub mod state;
pub mod store;

pub use error::{ApiError, ErrorCode};
pub use session::Session;
pub use state::{CartState, ConfigState};
pub use store::{
    CatalogSource, MemoryCatalog, MemoryOrderStore, MemoryUserDirectory, OrderStore, StoreError,
    UserDirectory,
};

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=brew_session=trace` - Trace this crate only
/// - Default: `info`, with `debug` for the brew crates
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brew_session=debug,brew_core=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
