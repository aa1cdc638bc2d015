//! # Domain Types
//!
//! Records and enums shared by the cart, the status machine and the
//! session layer.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │ FulfillmentType │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Pickup         │   │  Preparing      │       │
//! │  │  name           │   │  Delivery       │   │  Ready          │       │
//! │  │  base_price     │   │  Unknown        │   │  Delivering     │       │
//! │  │  is_available   │   └─────────────────┘   │  Delivered      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ PaymentStatus   │   │   Identity      │                             │
//! │  │  Unpaid / Paid  │   │  user_id, Role  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog Item
// =============================================================================

/// A menu entry as stored by the catalog.
///
/// The cart never holds on to this record; it copies name and price into a
/// [`crate::cart::CartLine`] at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Money,
    pub category: String,
    /// Items are on sale unless explicitly switched off.
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_available() -> bool {
    true
}

/// What the admin menu editor submits for a new or edited item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl MenuItemDraft {
    /// Turns a (validated) draft into a catalog record with the given id.
    ///
    /// Name, category and description are trimmed.
    pub fn into_catalog_item(self, id: impl Into<String>) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            base_price: self.price,
            category: self.category.trim().to_string(),
            is_available: self.is_available,
            image: self.image.filter(|url| !url.trim().is_empty()),
        }
    }
}

// =============================================================================
// Fulfillment Type
// =============================================================================

/// How the customer receives the order.
///
/// `Unknown` covers records written before the field existed or with a
/// value this build does not recognise. Such orders get no transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FulfillmentType {
    Pickup,
    Delivery,
    #[default]
    Unknown,
}

impl FulfillmentType {
    /// Parses a stored value. Anything unrecognised maps to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pickup" | "collect" | "collection" => FulfillmentType::Pickup,
            "delivery" => FulfillmentType::Delivery,
            _ => FulfillmentType::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FulfillmentType::Unknown)
    }
}

impl<'de> Deserialize<'de> for FulfillmentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(FulfillmentType::parse)
            .unwrap_or_default())
    }
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentType::Pickup => write!(f, "pickup"),
            FulfillmentType::Delivery => write!(f, "delivery"),
            FulfillmentType::Unknown => write!(f, "unknown"),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Kitchen-side status of a placed order.
///
/// Which of these an order may pass through depends on its
/// [`FulfillmentType`]; see [`crate::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Preparing,
    Ready,
    Delivering,
    Delivered,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::Ready => write!(f, "ready"),
            OrderStatus::Delivering => write!(f, "delivering"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Settlement state of an order; independent of [`OrderStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

// =============================================================================
// Identity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// The signed-in user, as supplied by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

impl Identity {
    pub fn customer(user_id: impl Into<String>) -> Self {
        Identity {
            user_id: user_id.into(),
            role: Role::Customer,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Identity {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// A registered account as the admin user list shows it.
///
/// Revoking access flips `is_active`; the account itself is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    #[serde(alias = "uid")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// Accounts are active unless revoked.
    #[serde(default = "default_available")]
    pub is_active: bool,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.trim(), self.surname.trim())
            .trim()
            .to_string()
    }
}
