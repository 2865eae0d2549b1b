//! Authentication Handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, LogoutResponse};
use shared::{ApiResponse, AppResult, Route};

use crate::auth::{AdminResult, AdminSession};
use crate::core::ServerState;
use crate::views::{LoginForm, RouteSlot};

/// POST /api/auth/login - run the login form
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let route = Arc::new(RouteSlot::new());
    let form = LoginForm::new(state.auth.clone(), route.clone());
    let session = form.submit(&req).await?;

    let redirect = route.last().unwrap_or(Route::Dashboard).path();
    Ok(Json(ApiResponse::success(LoginResponse { session, redirect })))
}

/// POST /api/auth/logout - sign out and unmount the dashboard
pub async fn logout(
    State(state): State<ServerState>,
    admin: AdminSession,
) -> AdminResult<Json<ApiResponse<LogoutResponse>>> {
    let result = admin.dashboard.logout().await;
    state.dashboards.remove(&admin.token);
    admin.guard(result)?;

    let redirect = admin.route.last().unwrap_or(Route::Login).path();
    Ok(Json(ApiResponse::success(LogoutResponse { redirect })))
}
