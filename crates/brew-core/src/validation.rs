//! # Validation Module
//!
//! Input checks the session layer runs before handing values to the cart
//! or the order snapshot. The cart itself assumes validated input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile client                                                │
//! │  └── Quantity stepper never goes below 1, required-field hints         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: brew-session command                                         │
//! │  └── THIS MODULE: quantity, price, menu fields, address                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: brew-core cart / order (no checks, trusts its input)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::MenuItemDraft;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY, MAX_PRICE_CENTS, MENU_CATEGORIES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_ADDRESS_LEN: usize = 300;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity for a new cart line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (99)
///
/// ```rust
/// use brew_core::validation::validate_quantity;
///
/// assert!(validate_quantity(2).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents: 0 (free items) up to [`MAX_PRICE_CENTS`].
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates that one more line fits in a cart holding `current_lines`.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

fn require_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a menu item name (1-100 characters after trimming).
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    require_text("name", name, MAX_NAME_LEN)
}

/// Validates a menu category against [`MENU_CATEGORIES`] (case-insensitive).
///
/// ## Returns
/// The canonical spelling of the category.
///
/// ```rust
/// use brew_core::validation::validate_category;
///
/// assert_eq!(validate_category("cold drinks").unwrap(), "Cold Drinks");
/// assert!(validate_category("Pizza").is_err());
/// ```
pub fn validate_category(category: &str) -> ValidationResult<&'static str> {
    let wanted = category.trim();

    if wanted.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    MENU_CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: MENU_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        })
}

/// Validates a delivery address (required, at most 300 characters).
pub fn validate_delivery_address(address: &str) -> ValidationResult<()> {
    require_text("delivery address", address, MAX_ADDRESS_LEN)
}

/// Validates everything the admin menu editor submits.
///
/// ## Returns
/// The draft with its category replaced by the canonical spelling.
pub fn validate_menu_item(draft: MenuItemDraft) -> ValidationResult<MenuItemDraft> {
    validate_item_name(&draft.name)?;
    let category = validate_category(&draft.category)?;
    validate_price_cents(draft.price.cents())?;

    if draft.description.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(MenuItemDraft {
        category: category.to_string(),
        ..draft
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
