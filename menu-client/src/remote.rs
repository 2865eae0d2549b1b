//! Remote backend over the hosted REST and auth APIs

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use shared::models::{
    AvailabilityUpdate, Category, CategoryCreate, CategoryOption, MenuItemCreate,
    MenuItemWithCategory, RawMenuCategory,
};
use shared::{AuthEvent, AuthUser, Credentials, Session};

use crate::auth_events::{AuthEvents, AuthSubscription};
use crate::backend::{AuthService, CATEGORIES, MENU_ITEMS, MenuStore};
use crate::query::TableQuery;
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

const ADMIN_ITEM_COLUMNS: &str =
    "id, name, description, price, is_available, category_id, categories (name)";
const PUBLIC_MENU_COLUMNS: &str =
    "id, name, menu_items (id, name, description, price, is_available)";

/// Backend client speaking to the hosted service
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    http: HttpClient,
    events: AuthEvents,
}

impl RemoteBackend {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            events: AuthEvents::with_capacity(config.event_capacity),
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    async fn insert<B: Serialize + Sync>(&self, session: &Session, table: &str, body: &B) -> ClientResult<()> {
        let request = self
            .http
            .rest(Method::POST, &TableQuery::from(table), Some(session))
            .header("Prefer", "return=minimal")
            .json(body);
        self.http.send_empty(request).await
    }

    async fn delete_by_id(&self, session: &Session, table: &str, id: &str) -> ClientResult<()> {
        let query = TableQuery::from(table).eq("id", id);
        let request = self.http.rest(Method::DELETE, &query, Some(session));
        self.http.send_empty(request).await
    }
}

#[async_trait]
impl AuthService for RemoteBackend {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> ClientResult<Session> {
        let request = self
            .http
            .auth(Method::POST, "token", None)
            .query(&[("grant_type", "password")])
            .json(credentials);

        let session: Session = self.http.send_json(request).await.map_err(|e| match e {
            // the token endpoint answers a bad password with 400
            ClientError::Validation(msg) | ClientError::Unauthorized(msg) => ClientError::Unauthorized(msg),
            other => other,
        })?;

        tracing::info!(user_id = %session.user.id, "Signed in");
        self.events.emit(AuthEvent::SignedIn(session.user.clone()));
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> ClientResult<()> {
        let request = self.http.auth(Method::POST, "logout", Some(session));
        match self.http.send_empty(request).await {
            Ok(()) => {}
            // token already revoked or expired: the session is gone either way
            Err(ClientError::Unauthorized(_) | ClientError::Forbidden(_) | ClientError::NotFound(_)) => {
                tracing::debug!(user_id = %session.user.id, "Logout with a stale session");
            }
            Err(e) => return Err(e),
        }

        tracing::info!(user_id = %session.user.id, "Signed out");
        self.events.emit(AuthEvent::SignedOut(session.user.clone()));
        Ok(())
    }

    async fn get_user(&self, session: &Session) -> ClientResult<Option<AuthUser>> {
        let request = self.http.auth(Method::GET, "user", Some(session));
        match self.http.send_json::<AuthUser>(request).await {
            Ok(user) => Ok(Some(user)),
            Err(ClientError::Unauthorized(_) | ClientError::Forbidden(_) | ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn subscribe(&self) -> AuthSubscription {
        self.events.subscribe()
    }
}

#[async_trait]
impl MenuStore for RemoteBackend {
    async fn list_categories(&self, session: &Session) -> ClientResult<Vec<Category>> {
        let query = TableQuery::from(CATEGORIES)
            .select("*")
            .order("display_order", true);
        let request = self.http.rest(Method::GET, &query, Some(session));
        self.http.send_json(request).await
    }

    async fn list_category_options(&self, session: &Session) -> ClientResult<Vec<CategoryOption>> {
        let query = TableQuery::from(CATEGORIES)
            .select("id, name")
            .order("display_order", true);
        let request = self.http.rest(Method::GET, &query, Some(session));
        self.http.send_json(request).await
    }

    async fn insert_category(&self, session: &Session, category: &CategoryCreate) -> ClientResult<()> {
        self.insert(session, CATEGORIES, category).await
    }

    async fn delete_category(&self, session: &Session, id: &str) -> ClientResult<()> {
        self.delete_by_id(session, CATEGORIES, id).await
    }

    async fn list_menu_items(&self, session: &Session) -> ClientResult<Vec<MenuItemWithCategory>> {
        let query = TableQuery::from(MENU_ITEMS)
            .select(ADMIN_ITEM_COLUMNS)
            .order("name", true);
        let request = self.http.rest(Method::GET, &query, Some(session));
        self.http.send_json(request).await
    }

    async fn insert_menu_item(&self, session: &Session, item: &MenuItemCreate) -> ClientResult<()> {
        self.insert(session, MENU_ITEMS, item).await
    }

    async fn set_availability(&self, session: &Session, id: &str, is_available: bool) -> ClientResult<()> {
        let query = TableQuery::from(MENU_ITEMS).eq("id", id);
        let request = self
            .http
            .rest(Method::PATCH, &query, Some(session))
            .header("Prefer", "return=minimal")
            .json(&AvailabilityUpdate { is_available });
        self.http.send_empty(request).await
    }

    async fn delete_menu_item(&self, session: &Session, id: &str) -> ClientResult<()> {
        self.delete_by_id(session, MENU_ITEMS, id).await
    }

    async fn fetch_public_menu(&self) -> ClientResult<Vec<RawMenuCategory>> {
        let query = TableQuery::from(CATEGORIES)
            .select(PUBLIC_MENU_COLUMNS)
            .order("display_order", true)
            .order_referenced(MENU_ITEMS, "name", true);
        let request = self.http.rest(Method::GET, &query, None);
        self.http.send_json(request).await
    }
}
