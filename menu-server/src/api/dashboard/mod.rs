//! Admin dashboard route (gated)

use axum::{Json, Router, routing::get};
use shared::ApiResponse;
use shared::view::DashboardView;

use crate::auth::{AdminResult, AdminSession};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/admin/dashboard", get(show))
}

/// GET /admin/dashboard - refresh both panels and return the snapshot
pub async fn show(admin: AdminSession) -> AdminResult<Json<ApiResponse<DashboardView>>> {
    let view = admin.guard(admin.dashboard.refresh().await)?;
    Ok(Json(ApiResponse::success(view)))
}
