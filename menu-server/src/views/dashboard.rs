//! Admin dashboard
//!
//! Session gate plus the two managers for one admin session, and the logout
//! control.

use std::sync::Arc;

use menu_client::{AuthService, MenuStore};
use shared::error::{AppError, AppResult};
use shared::view::DashboardView;
use shared::{AuthUser, Route, Session};

use super::category_manager::CategoryManager;
use super::item_manager::MenuItemManager;
use super::navigation::Navigator;
use super::session_gate::SessionGate;

pub struct Dashboard {
    auth: Arc<dyn AuthService>,
    navigator: Arc<dyn Navigator>,
    session: Session,
    user: AuthUser,
    gate: SessionGate,
    pub categories: CategoryManager,
    pub menu_items: MenuItemManager,
}

impl Dashboard {
    /// Pass the gate, then load both managers
    ///
    /// Returns `None` when the gate redirected to login. Load failures do
    /// not prevent mounting; they show up in the panels.
    pub async fn mount(
        auth: Arc<dyn AuthService>,
        store: Arc<dyn MenuStore>,
        navigator: Arc<dyn Navigator>,
        mut session: Session,
    ) -> Option<Self> {
        let gate = SessionGate::new(auth.clone(), navigator.clone());
        let user = gate.mount(Some(&session)).await?;
        session.user = user.clone();

        let dashboard = Self {
            categories: CategoryManager::new(store.clone(), session.clone()),
            menu_items: MenuItemManager::new(store, session.clone()),
            auth,
            navigator,
            session,
            user,
            gate,
        };
        if let Err(e) = dashboard.refresh().await {
            tracing::info!(user_id = %dashboard.user.id, error = %e, "Session rejected while loading dashboard");
            dashboard.end_session();
            return None;
        }
        tracing::info!(user_id = %dashboard.user.id, "Dashboard mounted");
        Some(dashboard)
    }

    /// Re-fetch both panels
    ///
    /// Load failures stay in the panels; only a rejected session is
    /// returned as an error.
    pub async fn refresh(&self) -> AppResult<DashboardView> {
        let categories = self.categories.list().await.map(|_| ());
        let items = self.menu_items.load().await;
        for result in [categories, items] {
            if let Err(e) = result
                && e.is_session_ended()
            {
                return Err(e);
            }
        }
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> DashboardView {
        DashboardView {
            user: self.user.clone(),
            categories: self.categories.snapshot(),
            menu_items: self.menu_items.snapshot(),
        }
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Still behind a live session
    pub fn is_admitted(&self) -> bool {
        self.gate.is_admitted()
    }

    pub fn is_listening(&self) -> bool {
        self.gate.is_listening()
    }

    /// Sign out and go to the login view
    ///
    /// Navigation happens even when the backend call fails.
    pub async fn logout(&self) -> AppResult<()> {
        let result = self.auth.sign_out(&self.session).await;
        self.navigator.navigate(Route::Login);
        result.map_err(|e| {
            tracing::warn!(user_id = %self.user.id, error = %e, "Sign-out failed");
            AppError::from(e)
        })
    }

    /// The backend no longer accepts the session: stop listening and go to
    /// the login view
    pub fn end_session(&self) {
        self.gate.close();
    }

    /// Tear down the gate's subscription
    pub fn unmount(&self) {
        self.gate.teardown();
        tracing::debug!(user_id = %self.user.id, "Dashboard unmounted");
    }
}
