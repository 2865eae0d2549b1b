//! View snapshots and navigation targets
//!
//! Every view in menu-server renders into one of these serializable
//! snapshots; the HTTP layer returns them as JSON.

use serde::{Deserialize, Serialize};

use crate::models::{Category, CategoryOption, DisplayMenuCategory, MenuItemDraft, MenuItemWithCategory};
use crate::session::AuthUser;

/// Navigation target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", content = "restaurant_id", rename_all = "snake_case")]
pub enum Route {
    /// Admin login view
    Login,
    /// Admin dashboard (gated)
    Dashboard,
    /// Public menu of one restaurant
    PublicMenu(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/admin".to_string(),
            Self::Dashboard => "/admin/dashboard".to_string(),
            Self::PublicMenu(id) => format!("/menu/{id}"),
        }
    }
}

/// Category manager state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPanel {
    /// Sorted by `display_order` ascending
    pub categories: Vec<Category>,
    /// "New category" input
    pub name_input: String,
    pub error: Option<String>,
    /// Submit controls are disabled while true
    pub busy: bool,
}

/// Menu item manager state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPanel {
    /// Sorted by item name ascending
    pub items: Vec<MenuItemWithCategory>,
    /// Options of the category selector, in `display_order`
    pub categories: Vec<CategoryOption>,
    pub draft: MenuItemDraft,
    pub error: Option<String>,
    pub busy: bool,
}

/// Admin dashboard snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub user: AuthUser,
    pub categories: CategoryPanel,
    pub menu_items: MenuItemPanel,
}

/// Public menu render result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PublicMenuView {
    /// At least one category with an available item
    Menu {
        restaurant_id: String,
        categories: Vec<DisplayMenuCategory>,
    },
    /// Nothing is available right now
    Empty {
        restaurant_id: String,
        message: String,
    },
    /// The menu could not be fetched
    Error {
        restaurant_id: String,
        message: String,
    },
}

impl PublicMenuView {
    pub fn restaurant_id(&self) -> &str {
        match self {
            Self::Menu { restaurant_id, .. }
            | Self::Empty { restaurant_id, .. }
            | Self::Error { restaurant_id, .. } => restaurant_id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
