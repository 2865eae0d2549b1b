//! Category manager
//!
//! Lists categories in `display_order`, adds named categories and deletes
//! them after confirmation. Every successful mutation is followed by a full
//! re-list; nothing is applied optimistically.

use std::sync::Arc;

use menu_client::{ClientError, MenuStore};
use parking_lot::Mutex;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryCreate};
use shared::view::CategoryPanel;
use shared::Session;

use super::busy::BusyFlag;
use super::navigation::Confirm;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

pub const CATEGORY_NAME_REQUIRED: &str = "Kategori adı boş olamaz.";
pub const CONFIRM_DELETE_CATEGORY: &str = "Bu kategoriyi silmek istediğinizden emin misiniz?";

#[derive(Debug, Default)]
struct PanelState {
    categories: Vec<Category>,
    name_input: String,
    error: Option<String>,
}

pub struct CategoryManager {
    store: Arc<dyn MenuStore>,
    session: Session,
    state: Mutex<PanelState>,
    busy: BusyFlag,
}

impl CategoryManager {
    pub fn new(store: Arc<dyn MenuStore>, session: Session) -> Self {
        Self {
            store,
            session,
            state: Mutex::new(PanelState::default()),
            busy: BusyFlag::default(),
        }
    }

    /// Fetch all categories; on error the previous list stays
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        match self.store.list_categories(&self.session).await {
            Ok(categories) => {
                let mut state = self.state.lock();
                state.categories = categories.clone();
                state.error = None;
                Ok(categories)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Category list failed");
                Err(self.fail(e.into()))
            }
        }
    }

    /// Add a category named `name`
    ///
    /// A blank name is rejected without a backend call. On success the input
    /// is cleared and the list re-fetched; on failure the input is kept.
    pub async fn add(&self, name: &str) -> AppResult<()> {
        let _busy = self.busy.try_acquire()?;
        self.state.lock().name_input = name.to_string();

        if name.trim().is_empty() {
            return Err(self.fail(AppError::with_message(
                ErrorCode::CategoryNameRequired,
                CATEGORY_NAME_REQUIRED,
            )));
        }
        validate_required_text(name, "name", MAX_NAME_LEN).map_err(|e| self.fail(e))?;

        let create = CategoryCreate::named(name.trim());
        if let Err(e) = self.store.insert_category(&self.session, &create).await {
            tracing::warn!(error = %e, "Category insert failed");
            return Err(self.fail(e.into()));
        }

        tracing::info!(name = %create.name, "Category added");
        self.state.lock().name_input.clear();
        // the insert stands even if the refresh fails; the panel shows the error
        let _ = self.list().await;
        Ok(())
    }

    /// Delete a category once `confirm` approves
    ///
    /// Returns `Ok(false)` without a backend call when declined.
    pub async fn delete(&self, id: &str, confirm: &impl Confirm) -> AppResult<bool> {
        if !confirm.confirm(CONFIRM_DELETE_CATEGORY) {
            return Ok(false);
        }
        let _busy = self.busy.try_acquire()?;

        if let Err(e) = self.store.delete_category(&self.session, id).await {
            tracing::warn!(category_id = %id, error = %e, "Category delete failed");
            let err = match e {
                // foreign key from menu_items without ON DELETE CASCADE
                ClientError::Conflict(message) => AppError::with_message(ErrorCode::CategoryHasItems, message),
                other => other.into(),
            };
            return Err(self.fail(err));
        }

        tracing::info!(category_id = %id, "Category deleted");
        let _ = self.list().await;
        Ok(true)
    }

    fn fail(&self, err: AppError) -> AppError {
        self.state.lock().error = Some(err.message.clone());
        err
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn snapshot(&self) -> CategoryPanel {
        let state = self.state.lock();
        CategoryPanel {
            categories: state.categories.clone(),
            name_input: state.name_input.clone(),
            error: state.error.clone(),
            busy: self.busy.is_busy(),
        }
    }
}
