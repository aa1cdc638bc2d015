//! # State Module
//!
//! Per-session and shared state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │   ConfigState (one, Arc-shared) ──┬──► Session A ──► CartState A        │
//! │                                   └──► Session B ──► CartState B        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Arc<Mutex<Cart>>, exclusive access per closure           │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartState;
pub use config::ConfigState;
