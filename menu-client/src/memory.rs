//! In-process backend
//!
//! Plain in-memory tables behind the same [`AuthService`] / [`MenuStore`]
//! seams as the remote client. Used for `BACKEND_MODE=memory` runs and as
//! the test double for the views: every call is counted per [`StoreOp`],
//! failures can be injected, and an artificial latency keeps a call in
//! flight long enough to observe concurrent submissions.
//!
//! Table behaviour follows the hosted schema:
//! - category inserts without `display_order` get `max + 1`
//! - deleting a category cascades to its menu items, unless restricted
//!   with [`MemoryBackend::restrict_category_deletes`]
//! - menu item inserts must reference an existing category
//! - updates and deletes that match no row succeed

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::models::{
    Category, CategoryCreate, CategoryOption, CategoryRef, MenuItem, MenuItemCreate,
    MenuItemWithCategory, RawMenuCategory, RawMenuItem,
};
use shared::util::now_secs;
use shared::{AuthEvent, AuthUser, Credentials, Session};
use uuid::Uuid;

use crate::auth_events::{AuthEvents, AuthSubscription};
use crate::backend::{AuthService, MenuStore};
use crate::{ClientError, ClientResult};

/// Session lifetime handed out by [`MemoryBackend::sign_in_with_password`]
pub const SESSION_TTL_SECS: i64 = 3600;

/// Backend operation, used to count calls and target injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    SignIn,
    SignOut,
    GetUser,
    ListCategories,
    ListCategoryOptions,
    InsertCategory,
    DeleteCategory,
    ListMenuItems,
    InsertMenuItem,
    SetAvailability,
    DeleteMenuItem,
    FetchPublicMenu,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: AuthUser,
}

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    items: Vec<MenuItem>,
}

/// In-memory implementation of the backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
    /// email -> account
    accounts: DashMap<String, Account>,
    /// access token -> session
    sessions: DashMap<String, Session>,
    events: AuthEvents,
    calls: Mutex<HashMap<StoreOp, usize>>,
    failures: Mutex<HashMap<StoreOp, String>>,
    latency: Mutex<Option<Duration>>,
    restrict_deletes: Mutex<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an admin account
    pub fn with_user(self, email: &str, password: &str) -> Self {
        self.add_user(email, password);
        self
    }

    pub fn add_user(&self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
        };
        self.accounts.insert(
            email.to_lowercase(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    /// Insert a category directly, bypassing auth and counters
    pub fn seed_category(&self, name: &str, display_order: i32) -> Category {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            display_order,
        };
        self.tables.lock().categories.push(category.clone());
        category
    }

    /// Insert a menu item directly, bypassing auth and counters
    pub fn seed_item(&self, category_id: &str, name: &str, price: Decimal, is_available: bool) -> MenuItem {
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.to_string(),
            name: name.to_string(),
            description: None,
            price,
            is_available,
        };
        self.tables.lock().items.push(item.clone());
        item
    }

    pub fn categories(&self) -> Vec<Category> {
        self.tables.lock().categories.clone()
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.tables.lock().items.clone()
    }

    /// Number of calls made to `op`
    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls.lock().get(&op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    /// Fail the next call to `op` with a backend error carrying `message`
    pub fn fail_next(&self, op: StoreOp, message: impl Into<String>) {
        self.failures.lock().insert(op, message.into());
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    /// Refuse to delete categories that still have items, like a foreign
    /// key without `ON DELETE CASCADE`
    pub fn restrict_category_deletes(&self, restrict: bool) {
        *self.restrict_deletes.lock() = restrict;
    }

    /// Make an issued session's token unacceptable, as if it had expired
    pub fn expire_session(&self, access_token: &str) {
        if let Some(mut session) = self.sessions.get_mut(access_token) {
            session.expires_at = Some(now_secs() - 1);
        }
    }

    /// Sign the user out from elsewhere (another tab, an admin revoke)
    pub fn revoke_session(&self, access_token: &str) {
        if let Some((_, session)) = self.sessions.remove(access_token) {
            self.events.emit(AuthEvent::SignedOut(session.user));
        }
    }

    /// Count the call, apply latency, and take an injected failure
    async fn enter(&self, op: StoreOp) -> ClientResult<()> {
        *self.calls.lock().entry(op).or_insert(0) += 1;

        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self.failures.lock().remove(&op);
        match failure {
            Some(message) => Err(ClientError::Api { status: 500, message }),
            None => Ok(()),
        }
    }

    fn authorize(&self, session: &Session) -> ClientResult<AuthUser> {
        match self.sessions.get(&session.access_token) {
            Some(stored) if stored.is_expired() => Err(ClientError::Unauthorized("JWT expired".into())),
            Some(stored) => Ok(stored.user.clone()),
            None => Err(ClientError::Unauthorized("invalid JWT".into())),
        }
    }

    fn sorted_categories(tables: &Tables) -> Vec<Category> {
        let mut categories = tables.categories.clone();
        categories.sort_by_key(|c| c.display_order);
        categories
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> ClientResult<Session> {
        self.enter(StoreOp::SignIn).await?;

        let account = self
            .accounts
            .get(&credentials.email.trim().to_lowercase())
            .map(|a| a.clone())
            .filter(|a| a.password == credentials.password)
            .ok_or_else(|| ClientError::Unauthorized("Invalid login credentials".into()))?;

        let session = Session {
            access_token: Uuid::new_v4().to_string(),
            token_type: "bearer".into(),
            expires_in: Some(SESSION_TTL_SECS),
            expires_at: Some(now_secs() + SESSION_TTL_SECS),
            refresh_token: Some(Uuid::new_v4().to_string()),
            user: account.user,
        };
        self.sessions.insert(session.access_token.clone(), session.clone());
        self.events.emit(AuthEvent::SignedIn(session.user.clone()));
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> ClientResult<()> {
        self.enter(StoreOp::SignOut).await?;

        let user = self
            .sessions
            .remove(&session.access_token)
            .map(|(_, stored)| stored.user)
            .unwrap_or_else(|| session.user.clone());
        self.events.emit(AuthEvent::SignedOut(user));
        Ok(())
    }

    async fn get_user(&self, session: &Session) -> ClientResult<Option<AuthUser>> {
        self.enter(StoreOp::GetUser).await?;
        Ok(self.authorize(session).ok())
    }

    fn subscribe(&self) -> AuthSubscription {
        self.events.subscribe()
    }
}

#[async_trait]
impl MenuStore for MemoryBackend {
    async fn list_categories(&self, session: &Session) -> ClientResult<Vec<Category>> {
        self.enter(StoreOp::ListCategories).await?;
        self.authorize(session)?;
        Ok(Self::sorted_categories(&self.tables.lock()))
    }

    async fn list_category_options(&self, session: &Session) -> ClientResult<Vec<CategoryOption>> {
        self.enter(StoreOp::ListCategoryOptions).await?;
        self.authorize(session)?;
        let tables = self.tables.lock();
        Ok(Self::sorted_categories(&tables).iter().map(CategoryOption::from).collect())
    }

    async fn insert_category(&self, session: &Session, category: &CategoryCreate) -> ClientResult<()> {
        self.enter(StoreOp::InsertCategory).await?;
        self.authorize(session)?;
        if category.name.trim().is_empty() {
            return Err(ClientError::Validation(
                "new row for relation \"categories\" violates check constraint \"categories_name_check\"".into(),
            ));
        }

        let mut tables = self.tables.lock();
        let display_order = category.display_order.unwrap_or_else(|| {
            tables
                .categories
                .iter()
                .map(|c| c.display_order)
                .max()
                .map_or(0, |max| max + 1)
        });
        tables.categories.push(Category {
            id: Uuid::new_v4().to_string(),
            name: category.name.clone(),
            display_order,
        });
        Ok(())
    }

    async fn delete_category(&self, session: &Session, id: &str) -> ClientResult<()> {
        self.enter(StoreOp::DeleteCategory).await?;
        self.authorize(session)?;
        let restrict = *self.restrict_deletes.lock();
        let mut tables = self.tables.lock();
        if restrict && tables.items.iter().any(|i| i.category_id == id) {
            return Err(ClientError::Conflict(
                "update or delete on table \"categories\" violates foreign key constraint \"menu_items_category_id_fkey\" on table \"menu_items\"".into(),
            ));
        }
        tables.categories.retain(|c| c.id != id);
        tables.items.retain(|i| i.category_id != id);
        Ok(())
    }

    async fn list_menu_items(&self, session: &Session) -> ClientResult<Vec<MenuItemWithCategory>> {
        self.enter(StoreOp::ListMenuItems).await?;
        self.authorize(session)?;
        let tables = self.tables.lock();
        let mut rows: Vec<MenuItemWithCategory> = tables
            .items
            .iter()
            .map(|item| MenuItemWithCategory {
                id: item.id.clone(),
                category_id: item.category_id.clone(),
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price,
                is_available: item.is_available,
                categories: tables
                    .categories
                    .iter()
                    .find(|c| c.id == item.category_id)
                    .map(|c| CategoryRef { name: c.name.clone() }),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert_menu_item(&self, session: &Session, item: &MenuItemCreate) -> ClientResult<()> {
        self.enter(StoreOp::InsertMenuItem).await?;
        self.authorize(session)?;
        if item.name.trim().is_empty() || item.price.is_sign_negative() {
            return Err(ClientError::Validation(
                "new row for relation \"menu_items\" violates check constraint".into(),
            ));
        }

        let mut tables = self.tables.lock();
        if !tables.categories.iter().any(|c| c.id == item.category_id) {
            return Err(ClientError::Conflict(
                "insert or update on table \"menu_items\" violates foreign key constraint \"menu_items_category_id_fkey\"".into(),
            ));
        }
        tables.items.push(MenuItem {
            id: Uuid::new_v4().to_string(),
            category_id: item.category_id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            is_available: item.is_available,
        });
        Ok(())
    }

    async fn set_availability(&self, session: &Session, id: &str, is_available: bool) -> ClientResult<()> {
        self.enter(StoreOp::SetAvailability).await?;
        self.authorize(session)?;
        let mut tables = self.tables.lock();
        if let Some(item) = tables.items.iter_mut().find(|i| i.id == id) {
            item.is_available = is_available;
        }
        Ok(())
    }

    async fn delete_menu_item(&self, session: &Session, id: &str) -> ClientResult<()> {
        self.enter(StoreOp::DeleteMenuItem).await?;
        self.authorize(session)?;
        self.tables.lock().items.retain(|i| i.id != id);
        Ok(())
    }

    async fn fetch_public_menu(&self) -> ClientResult<Vec<RawMenuCategory>> {
        self.enter(StoreOp::FetchPublicMenu).await?;
        let tables = self.tables.lock();
        Ok(Self::sorted_categories(&tables)
            .into_iter()
            .map(|category| {
                let mut menu_items: Vec<RawMenuItem> = tables
                    .items
                    .iter()
                    .filter(|i| i.category_id == category.id)
                    .map(|i| RawMenuItem {
                        id: i.id.clone(),
                        name: i.name.clone(),
                        description: i.description.clone(),
                        price: i.price,
                        is_available: i.is_available,
                    })
                    .collect();
                menu_items.sort_by(|a, b| a.name.cmp(&b.name));
                RawMenuCategory {
                    id: category.id,
                    name: category.name,
                    menu_items,
                }
            })
            .collect())
    }
}
