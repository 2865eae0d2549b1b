//! Backend seams
//!
//! [`AuthService`] and [`MenuStore`] are the two halves of the hosted
//! backend the views talk to. [`RemoteBackend`](crate::RemoteBackend)
//! implements both over HTTP; the in-process
//! [`MemoryBackend`](crate::MemoryBackend) implements both over plain
//! tables for local runs and tests.

use async_trait::async_trait;
use shared::models::{
    Category, CategoryCreate, CategoryOption, MenuItemCreate, MenuItemWithCategory, RawMenuCategory,
};
use shared::{AuthUser, Credentials, Session};

use crate::ClientResult;
use crate::auth_events::AuthSubscription;

/// Table names
pub const CATEGORIES: &str = "categories";
pub const MENU_ITEMS: &str = "menu_items";

/// Password authentication and session-change notifications
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session. Emits `SignedIn` on success.
    async fn sign_in_with_password(&self, credentials: &Credentials) -> ClientResult<Session>;

    /// End the session. Emits `SignedOut` for the session's user.
    async fn sign_out(&self, session: &Session) -> ClientResult<()>;

    /// Look up the user behind a session token
    ///
    /// `Ok(None)` means the token is no longer accepted.
    async fn get_user(&self, session: &Session) -> ClientResult<Option<AuthUser>>;

    /// Subscribe to session-change events
    fn subscribe(&self) -> AuthSubscription;
}

/// Category and menu item tables
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// All categories, `display_order` ascending
    async fn list_categories(&self, session: &Session) -> ClientResult<Vec<Category>>;

    /// `id, name` of all categories, `display_order` ascending
    async fn list_category_options(&self, session: &Session) -> ClientResult<Vec<CategoryOption>>;

    async fn insert_category(&self, session: &Session, category: &CategoryCreate) -> ClientResult<()>;

    async fn delete_category(&self, session: &Session, id: &str) -> ClientResult<()>;

    /// All menu items joined with their category name, `name` ascending
    async fn list_menu_items(&self, session: &Session) -> ClientResult<Vec<MenuItemWithCategory>>;

    async fn insert_menu_item(&self, session: &Session, item: &MenuItemCreate) -> ClientResult<()>;

    /// Set `is_available` on one item; no match is not an error
    async fn set_availability(&self, session: &Session, id: &str, is_available: bool) -> ClientResult<()>;

    async fn delete_menu_item(&self, session: &Session, id: &str) -> ClientResult<()>;

    /// Anonymous read of categories (`display_order` ascending) with their
    /// nested items (`name` ascending)
    async fn fetch_public_menu(&self) -> ClientResult<Vec<RawMenuCategory>>;
}

/// Both halves of the backend
pub trait Backend: AuthService + MenuStore {}

impl<T: AuthService + MenuStore> Backend for T {}
