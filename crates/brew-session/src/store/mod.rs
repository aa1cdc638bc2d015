//! # External Collaborators
//!
//! The menu catalog, the order store and the user profiles live in a
//! hosted document database. Commands only see these traits, so the backend can be the
//! hosted one in production and [`memory`] in tests and local runs.
//!
//! ## Write Semantics
//! Partial updates (`StatusUpdate`, `PaymentUpdate`) are merged into the
//! stored document. Concurrent writers are last-write-wins; there is no
//! version check.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use brew_core::{CatalogItem, Order, PaymentUpdate, StatusUpdate, UserProfile};

pub use memory::{MemoryCatalog, MemoryOrderStore, MemoryUserDirectory};

/// Failures reported by a catalog or order store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// Backend could not be reached or refused the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored document does not match the expected shape.
    #[error("{entity} {id} is unreadable: {reason}")]
    Corrupt {
        entity: &'static str,
        id: String,
        reason: String,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Menu items.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn get_item(&self, item_id: &str) -> StoreResult<Option<CatalogItem>>;

    /// Every item, available or not.
    async fn list_items(&self) -> StoreResult<Vec<CatalogItem>>;

    /// Inserts or replaces the item with `item.id`.
    async fn save_item(&self, item: CatalogItem) -> StoreResult<()>;

    async fn delete_item(&self, item_id: &str) -> StoreResult<()>;
}

/// Placed orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores a new order snapshot. Fails on an existing id.
    async fn insert(&self, order: &Order) -> StoreResult<()>;

    async fn get(&self, order_id: &str) -> StoreResult<Option<Order>>;

    /// One user's orders, newest first.
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Order>>;

    /// All orders, newest first.
    async fn list_all(&self) -> StoreResult<Vec<Order>>;

    async fn update_status(&self, order_id: &str, update: StatusUpdate) -> StoreResult<()>;

    async fn update_payment(&self, order_id: &str, update: PaymentUpdate) -> StoreResult<()>;
}

/// User profiles. Sign-in itself happens in the external auth provider.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> StoreResult<Vec<UserProfile>>;

    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>>;

    /// Switches the `isActive` flag. Fails on an unknown user.
    async fn set_active(&self, user_id: &str, active: bool) -> StoreResult<()>;
}
