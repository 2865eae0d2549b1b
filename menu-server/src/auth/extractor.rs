//! Session gate extractor
//!
//! Gated handlers take an [`AdminSession`]. The bearer token is looked up in
//! the dashboard registry; an unknown token mounts a new dashboard (which
//! runs the session gate). Whenever the gate has sent the session to the
//! login view the request is answered with `303 See Other` to `/admin`.
//!
//! Handlers pass view results through [`AdminSession::guard`]: when the
//! backend stops accepting the session mid-request the dashboard is
//! unmounted and the response becomes the same redirect.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use shared::{AppError, AppResult, Route, Session};

use crate::core::{DashboardRegistry, MountedDashboard, ServerState};
use crate::views::{Dashboard, RouteSlot};

/// Admitted admin session with its mounted dashboard
#[derive(Clone)]
pub struct AdminSession {
    pub token: String,
    pub dashboard: Arc<Dashboard>,
    pub route: Arc<RouteSlot>,
    registry: Arc<DashboardRegistry>,
}

impl AdminSession {
    /// Pass a view result through, ending the session if the backend
    /// rejected it
    pub fn guard<T>(&self, result: AppResult<T>) -> AdminResult<T> {
        match result {
            Err(e) if e.is_session_ended() => {
                tracing::info!(user_id = %self.dashboard.user().id, reason = %e, "Session rejected, redirecting to login");
                self.dashboard.end_session();
                self.registry.remove(&self.token);
                Err(AdminError::SessionEnded)
            }
            other => other.map_err(AdminError::App),
        }
    }
}

/// Failure of a gated handler
#[derive(Debug)]
pub enum AdminError {
    /// Ordinary view error, answered in the API envelope
    App(AppError),
    /// The session is gone; answered with the login redirect
    SessionEnded,
}

impl From<AppError> for AdminError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        match self {
            Self::App(err) => err.into_response(),
            Self::SessionEnded => redirect_to_login().into_response(),
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub fn redirect_to_login() -> Redirect {
    Redirect::to(&Route::Login.path())
}

impl FromRequestParts<ServerState> for AdminSession {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AdminSession>() {
            return Ok(session.clone());
        }

        let Some(token) = bearer_token(parts).map(str::to_string) else {
            tracing::debug!(uri = %parts.uri, "Gated request without a session");
            return Err(redirect_to_login());
        };

        if let Some(mounted) = state.dashboards.get(&token) {
            if mounted.dashboard.is_admitted() && mounted.route.last() != Some(Route::Login) {
                let session = AdminSession {
                    token,
                    dashboard: mounted.dashboard,
                    route: mounted.route,
                    registry: state.dashboards.clone(),
                };
                parts.extensions.insert(session.clone());
                return Ok(session);
            }
            state.dashboards.remove(&token);
            tracing::info!(uri = %parts.uri, "Session ended, redirecting to login");
            return Err(redirect_to_login());
        }

        let route = Arc::new(RouteSlot::new());
        let Some(dashboard) = Dashboard::mount(
            state.auth.clone(),
            state.store.clone(),
            route.clone(),
            Session::from_access_token(token.clone()),
        )
        .await
        else {
            return Err(redirect_to_login());
        };

        let dashboard = Arc::new(dashboard);
        state.dashboards.insert(
            token.clone(),
            MountedDashboard {
                dashboard: dashboard.clone(),
                route: route.clone(),
            },
        );

        let session = AdminSession {
            token,
            dashboard,
            route,
            registry: state.dashboards.clone(),
        };
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}
