//! Public menu renderer
//!
//! One anonymous joined read: categories in `display_order` with their items
//! by name. Unavailable items are hidden and categories left without items
//! are dropped. The restaurant identifier is echoed in the view but does not
//! narrow the query; scoping is left to the backend's row policies.

use std::sync::Arc;

use menu_client::MenuStore;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{DisplayMenuCategory, DisplayMenuItem, RawMenuCategory};
use shared::view::PublicMenuView;

pub const EMPTY_MENU: &str = "Menümüzde şu an mevcut ürün bulunmamaktadır.";
pub const MENU_UNAVAILABLE: &str = "Hata: Menü Yüklenemedi";

pub struct PublicMenu {
    store: Arc<dyn MenuStore>,
    currency_suffix: String,
}

impl PublicMenu {
    pub fn new(store: Arc<dyn MenuStore>, currency_suffix: impl Into<String>) -> Self {
        Self {
            store,
            currency_suffix: currency_suffix.into(),
        }
    }

    pub async fn render(&self, restaurant_id: &str) -> PublicMenuView {
        let restaurant_id = restaurant_id.to_string();
        match self.store.fetch_public_menu().await {
            Ok(raw) => {
                let categories = build_display_menu(raw, &self.currency_suffix);
                if categories.is_empty() {
                    PublicMenuView::Empty {
                        restaurant_id,
                        message: EMPTY_MENU.to_string(),
                    }
                } else {
                    PublicMenuView::Menu {
                        restaurant_id,
                        categories,
                    }
                }
            }
            Err(e) => {
                tracing::error!(restaurant_id = %restaurant_id, error = %e, "Public menu fetch failed");
                PublicMenuView::Error {
                    restaurant_id,
                    message: MENU_UNAVAILABLE.to_string(),
                }
            }
        }
    }
}

/// Keep available items, drop empty categories, label prices
///
/// Input order is preserved.
pub fn build_display_menu(raw: Vec<RawMenuCategory>, currency_suffix: &str) -> Vec<DisplayMenuCategory> {
    raw.into_iter()
        .filter_map(|category| {
            let items: Vec<DisplayMenuItem> = category
                .menu_items
                .into_iter()
                .filter(|item| item.is_available)
                .map(|item| DisplayMenuItem {
                    price_label: price_label(item.price, currency_suffix),
                    id: item.id,
                    name: item.name,
                    description: item.description.filter(|d| !d.is_empty()),
                    price: item.price,
                })
                .collect();
            (!items.is_empty()).then(|| DisplayMenuCategory {
                id: category.id,
                name: category.name,
                items,
            })
        })
        .collect()
}

/// Two decimals, half away from zero, then the suffix: `12.50 TL`
pub fn price_label(price: Decimal, currency_suffix: &str) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if currency_suffix.is_empty() {
        format!("{rounded:.2}")
    } else {
        format!("{rounded:.2} {currency_suffix}")
    }
}
