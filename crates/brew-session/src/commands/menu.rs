//! # Menu Commands
//!
//! Customers see available items, optionally narrowed to one category.
//! Admins create, edit, switch off and delete items.

use tracing::{debug, info};
use uuid::Uuid;

use brew_core::validation::validate_menu_item;
use brew_core::{CatalogItem, MenuItemDraft};

use crate::error::ApiError;
use crate::session::Session;
use crate::store::CatalogSource;

/// Lists items on sale.
///
/// `category` matches case-insensitively and ignores surrounding spaces.
/// `None`, a blank string or `"All"` returns every available item.
pub async fn browse_menu(
    catalog: &dyn CatalogSource,
    category: Option<&str>,
) -> Result<Vec<CatalogItem>, ApiError> {
    let wanted = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
    debug!(category = ?wanted, "browse_menu command");

    let items = catalog
        .list_items()
        .await?
        .into_iter()
        .filter(|item| item.is_available)
        .filter(|item| match wanted {
            Some(c) => item.category.trim().eq_ignore_ascii_case(c),
            None => true,
        })
        .collect();

    Ok(items)
}

/// Creates an item (`item_id` is `None`) or replaces an existing one.
///
/// ## Returns
/// The stored item, with a fresh id when created.
pub async fn save_menu_item(
    session: &Session,
    catalog: &dyn CatalogSource,
    item_id: Option<String>,
    draft: MenuItemDraft,
) -> Result<CatalogItem, ApiError> {
    session.require_admin()?;

    let draft = validate_menu_item(draft)?;

    let id = match item_id {
        Some(id) => {
            if catalog.get_item(&id).await?.is_none() {
                return Err(ApiError::not_found("Menu item", &id));
            }
            id
        }
        None => Uuid::new_v4().to_string(),
    };

    let item = draft.into_catalog_item(id);
    catalog.save_item(item.clone()).await?;

    info!(item_id = %item.id, name = %item.name, price = %item.base_price, "Menu item saved");
    Ok(item)
}

/// Flips an item between available and sold out.
pub async fn toggle_item_availability(
    session: &Session,
    catalog: &dyn CatalogSource,
    item_id: &str,
) -> Result<CatalogItem, ApiError> {
    session.require_admin()?;

    let mut item = catalog
        .get_item(item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", item_id))?;

    item.is_available = !item.is_available;
    catalog.save_item(item.clone()).await?;

    info!(item_id, is_available = item.is_available, "Menu item availability changed");
    Ok(item)
}

/// Removes an item from the menu. Carts and orders holding it keep
/// their snapshots.
pub async fn delete_menu_item(
    session: &Session,
    catalog: &dyn CatalogSource,
    item_id: &str,
) -> Result<(), ApiError> {
    session.require_admin()?;

    catalog.delete_item(item_id).await?;

    info!(item_id, "Menu item deleted");
    Ok(())
}
