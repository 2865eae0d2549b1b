//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::{opaque_id, text_or_number};

/// Menu item entity (`menu_items` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(with = "opaque_id")]
    pub id: String,
    /// Category reference (foreign key, resolved by the backend join)
    #[serde(with = "opaque_id")]
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
}

/// Embedded `categories (name)` resource on an admin list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

/// Admin list row: menu item joined with its category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemWithCategory {
    #[serde(with = "opaque_id")]
    pub id: String,
    #[serde(with = "opaque_id")]
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
    /// Null when the referenced category row is not visible to the caller
    pub categories: Option<CategoryRef>,
}

impl MenuItemWithCategory {
    pub fn category_name(&self) -> Option<&str> {
        self.categories.as_ref().map(|c| c.name.as_str())
    }
}

/// Create menu item payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: String,
    pub name: String,
    /// Serialized as `null` when empty
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
}

/// Availability update payload (the only in-place edit of a menu item)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}

/// "New item" form input as typed by the admin
///
/// The price is kept as entered text and coerced to a decimal on submit;
/// clients may send it as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "text_or_number::deserialize")]
    pub price: String,
    pub category_id: String,
    pub is_available: bool,
}

impl Default for MenuItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: "0".to_string(),
            category_id: String::new(),
            is_available: true,
        }
    }
}

impl MenuItemDraft {
    /// Fresh draft pre-selecting the given category
    pub fn for_category(category_id: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            ..Self::default()
        }
    }
}
