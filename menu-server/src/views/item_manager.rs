//! Menu item manager
//!
//! Loads the category selector options and the joined item list, adds items
//! from the form draft, toggles availability and deletes after
//! confirmation. Every successful mutation reloads both lists.

use std::sync::Arc;

use menu_client::MenuStore;
use parking_lot::Mutex;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CategoryOption, MenuItemCreate, MenuItemDraft, MenuItemWithCategory};
use shared::view::MenuItemPanel;
use shared::Session;

use super::busy::BusyFlag;
use super::navigation::Confirm;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, none_if_blank, parse_positive_price, validate_optional_text,
    validate_required_text,
};

pub const INVALID_ITEM: &str = "Lütfen tüm alanları doğru doldurun.";
pub const CONFIRM_DELETE_ITEM: &str = "Bu menü öğesini silmek istediğinize emin misiniz?";

#[derive(Debug, Default)]
struct PanelState {
    items: Vec<MenuItemWithCategory>,
    categories: Vec<CategoryOption>,
    draft: MenuItemDraft,
    error: Option<String>,
}

pub struct MenuItemManager {
    store: Arc<dyn MenuStore>,
    session: Session,
    state: Mutex<PanelState>,
    busy: BusyFlag,
}

impl MenuItemManager {
    pub fn new(store: Arc<dyn MenuStore>, session: Session) -> Self {
        Self {
            store,
            session,
            state: Mutex::new(PanelState::default()),
            busy: BusyFlag::default(),
        }
    }

    /// Fetch category options, then items
    ///
    /// The error is cleared first. A failed category fetch stops the load
    /// before items are requested. The draft's category is defaulted to the
    /// first option only when none is selected.
    pub async fn load(&self) -> AppResult<()> {
        self.state.lock().error = None;

        let categories = match self.store.list_category_options(&self.session).await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::warn!(error = %e, "Category options fetch failed");
                return Err(self.fail(e.into()));
            }
        };
        {
            let mut state = self.state.lock();
            if state.draft.category_id.is_empty()
                && let Some(first) = categories.first()
            {
                state.draft.category_id = first.id.clone();
            }
            state.categories = categories;
        }

        match self.store.list_menu_items(&self.session).await {
            Ok(items) => {
                self.state.lock().items = items;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Menu item fetch failed");
                Err(self.fail(e.into()))
            }
        }
    }

    /// Validate and insert the draft
    ///
    /// Requires a name, a selected category and a price above zero; anything
    /// else is rejected without a backend call. An empty description is
    /// stored as null. On success the draft is reset to the first category.
    pub async fn add(&self, draft: MenuItemDraft) -> AppResult<()> {
        let _busy = self.busy.try_acquire()?;
        self.state.lock().draft = draft.clone();

        let create = self.validate(&draft).map_err(|e| self.fail(e))?;
        if let Err(e) = self.store.insert_menu_item(&self.session, &create).await {
            tracing::warn!(error = %e, "Menu item insert failed");
            return Err(self.fail(e.into()));
        }

        tracing::info!(name = %create.name, category_id = %create.category_id, "Menu item added");
        {
            let mut state = self.state.lock();
            let first = state.categories.first().map(|c| c.id.clone()).unwrap_or_default();
            state.draft = MenuItemDraft::for_category(first);
        }
        let _ = self.load().await;
        Ok(())
    }

    fn validate(&self, draft: &MenuItemDraft) -> AppResult<MenuItemCreate> {
        let invalid = |code| AppError::with_message(code, INVALID_ITEM);

        if draft.name.trim().is_empty() {
            return Err(invalid(ErrorCode::MenuItemNameRequired));
        }
        if draft.category_id.trim().is_empty() {
            return Err(invalid(ErrorCode::CategoryRequired));
        }
        let price = parse_positive_price(&draft.price).ok_or_else(|| invalid(ErrorCode::MenuItemInvalidPrice))?;
        validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(Some(&draft.description), "description", MAX_NOTE_LEN)?;

        Ok(MenuItemCreate {
            category_id: draft.category_id.trim().to_string(),
            name: draft.name.trim().to_string(),
            description: none_if_blank(&draft.description),
            price,
            is_available: draft.is_available,
        })
    }

    /// Delete an item once `confirm` approves; `Ok(false)` when declined
    pub async fn delete(&self, id: &str, confirm: &impl Confirm) -> AppResult<bool> {
        if !confirm.confirm(CONFIRM_DELETE_ITEM) {
            return Ok(false);
        }
        let _busy = self.busy.try_acquire()?;

        if let Err(e) = self.store.delete_menu_item(&self.session, id).await {
            tracing::warn!(item_id = %id, error = %e, "Menu item delete failed");
            return Err(self.fail(e.into()));
        }

        tracing::info!(item_id = %id, "Menu item deleted");
        let _ = self.load().await;
        Ok(true)
    }

    /// Flip `is_available` of a loaded item; returns the new value
    pub async fn toggle_availability(&self, id: &str) -> AppResult<bool> {
        let _busy = self.busy.try_acquire()?;

        let current = self
            .state
            .lock()
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.is_available);
        let Some(current) = current else {
            return Err(self.fail(AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("menu item {id} not found"),
            )));
        };

        let next = !current;
        if let Err(e) = self.store.set_availability(&self.session, id, next).await {
            tracing::warn!(item_id = %id, error = %e, "Availability update failed");
            return Err(self.fail(e.into()));
        }

        tracing::info!(item_id = %id, is_available = next, "Availability toggled");
        let _ = self.load().await;
        Ok(next)
    }

    fn fail(&self, err: AppError) -> AppError {
        self.state.lock().error = Some(err.message.clone());
        err
    }

    pub fn items(&self) -> Vec<MenuItemWithCategory> {
        self.state.lock().items.clone()
    }

    pub fn snapshot(&self) -> MenuItemPanel {
        let state = self.state.lock();
        MenuItemPanel {
            items: state.items.clone(),
            categories: state.categories.clone(),
            draft: state.draft.clone(),
            error: state.error.clone(),
            busy: self.busy.is_busy(),
        }
    }
}
