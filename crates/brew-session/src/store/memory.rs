//! In-memory catalog, order store and user directory.
//!
//! Orders are kept as JSON documents, the way the hosted store keeps them,
//! so partial updates are field merges and records written by older app
//! versions (no `fulfillmentType`, say) can be seeded with
//! [`MemoryOrderStore::insert_document`]. As in the hosted store, the
//! document key is the order id; the body need not repeat it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::error;

use brew_core::{CatalogItem, Order, PaymentUpdate, StatusUpdate, UserProfile};

use super::{CatalogSource, OrderStore, StoreError, StoreResult, UserDirectory};

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    items: RwLock<BTreeMap<String, CatalogItem>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        MemoryCatalog::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        MemoryCatalog {
            items: RwLock::new(items.into_iter().map(|i| (i.id.clone(), i)).collect()),
        }
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn get_item(&self, item_id: &str) -> StoreResult<Option<CatalogItem>> {
        Ok(self.items.read().await.get(item_id).cloned())
    }

    async fn list_items(&self) -> StoreResult<Vec<CatalogItem>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn save_item(&self, item: CatalogItem) -> StoreResult<()> {
        self.items.write().await.insert(item.id.clone(), item);
        Ok(())
    }

    async fn delete_item(&self, item_id: &str) -> StoreResult<()> {
        self.items
            .write()
            .await
            .remove(item_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Menu item", item_id))
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    documents: RwLock<BTreeMap<String, Value>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        MemoryOrderStore::default()
    }

    /// Stores a raw document under `order_id`, replacing any existing one.
    pub async fn insert_document(&self, order_id: impl Into<String>, document: Value) {
        self.documents.write().await.insert(order_id.into(), document);
    }

    async fn merge(&self, order_id: &str, patch: impl Serialize) -> StoreResult<()> {
        let patch = to_document(order_id, &patch)?;

        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(order_id)
            .ok_or_else(|| StoreError::not_found("Order", order_id))?;

        match (document, patch) {
            (Value::Object(fields), Value::Object(changes)) => {
                fields.extend(changes);
                Ok(())
            }
            _ => Err(corrupt(order_id, "not an object")),
        }
    }

    async fn collect<F>(&self, keep: F) -> StoreResult<Vec<Order>>
    where
        F: Fn(&Order) -> bool,
    {
        let documents = self.documents.read().await;

        let mut orders = Vec::with_capacity(documents.len());
        for (id, document) in documents.iter() {
            match from_document(id, document) {
                Ok(order) if keep(&order) => orders.push(order),
                Ok(_) => {}
                // Left out of lists; `get` still reports it as corrupt.
                Err(err) => error!(order_id = %id, error = %err, "Skipping unreadable order"),
            }
        }

        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }
}

fn corrupt(order_id: &str, reason: impl ToString) -> StoreError {
    StoreError::Corrupt {
        entity: "Order",
        id: order_id.to_string(),
        reason: reason.to_string(),
    }
}

fn to_document(order_id: &str, value: &impl Serialize) -> StoreResult<Value> {
    serde_json::to_value(value).map_err(|e| corrupt(order_id, e))
}

/// Reads an order, taking its id from the document key when the body
/// has none.
fn from_document(order_id: &str, document: &Value) -> StoreResult<Order> {
    let mut document = document.clone();
    if let Value::Object(fields) = &mut document {
        fields
            .entry("id")
            .or_insert_with(|| Value::String(order_id.to_string()));
    }

    Order::deserialize(document).map_err(|e| corrupt(order_id, e))
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: &Order) -> StoreResult<()> {
        let document = to_document(order.id(), order)?;

        let mut documents = self.documents.write().await;
        if documents.contains_key(order.id()) {
            return Err(StoreError::Duplicate {
                entity: "Order",
                id: order.id().to_string(),
            });
        }
        documents.insert(order.id().to_string(), document);
        Ok(())
    }

    async fn get(&self, order_id: &str) -> StoreResult<Option<Order>> {
        self.documents
            .read()
            .await
            .get(order_id)
            .map(|document| from_document(order_id, document))
            .transpose()
    }

    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        self.collect(|order| order.user_id() == user_id).await
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        self.collect(|_| true).await
    }

    async fn update_status(&self, order_id: &str, update: StatusUpdate) -> StoreResult<()> {
        self.merge(order_id, update).await
    }

    async fn update_payment(&self, order_id: &str, update: PaymentUpdate) -> StoreResult<()> {
        self.merge(order_id, update).await
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: RwLock<BTreeMap<String, UserProfile>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        MemoryUserDirectory::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserProfile>) -> Self {
        MemoryUserDirectory {
            users: RwLock::new(users.into_iter().map(|u| (u.user_id.clone(), u)).collect()),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn list_users(&self) -> StoreResult<Vec<UserProfile>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn get_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn set_active(&self, user_id: &str, active: bool) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::not_found("User", user_id))?;
        user.is_active = active;
        Ok(())
    }
}
