//! Category Model

use serde::{Deserialize, Serialize};

use crate::util::opaque_id;

/// Category entity (`categories` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(with = "opaque_id")]
    pub id: String,
    pub name: String,
    /// Presentation sequence, lower sorts first
    #[serde(default)]
    pub display_order: i32,
}

/// Create category payload
///
/// Categories are never updated in place, so there is no update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    /// Omitted from the insert when unset so the backend default applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

impl CategoryCreate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_order: None,
        }
    }
}

/// `id, name` projection used by the menu item form's category selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    #[serde(with = "opaque_id")]
    pub id: String,
    pub name: String,
}

impl From<&Category> for CategoryOption {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
        }
    }
}
