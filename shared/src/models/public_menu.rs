//! Public menu shapes
//!
//! The joined query returns [`RawMenuCategory`] rows (categories with their
//! nested `menu_items`); the public view renders [`DisplayMenuCategory`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::opaque_id;

/// Item nested under a category in the joined public query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMenuItem {
    #[serde(with = "opaque_id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
}

/// Category row with its embedded `menu_items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMenuCategory {
    #[serde(with = "opaque_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub menu_items: Vec<RawMenuItem>,
}

/// Item as shown to guests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMenuItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    /// Two-decimal price with currency suffix, e.g. `12.50 TL`
    pub price_label: String,
}

/// Category as shown to guests; never empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMenuCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<DisplayMenuItem>,
}
