//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query},
};
use shared::client::ConfirmQuery;
use shared::models::MenuItemDraft;
use shared::view::MenuItemPanel;
use shared::{ApiResponse, AppError};

use crate::auth::{AdminResult, AdminSession};

/// GET /api/admin/menu-items - load categories and items
pub async fn load(admin: AdminSession) -> AdminResult<Json<ApiResponse<MenuItemPanel>>> {
    let items = &admin.dashboard.menu_items;
    admin.guard(items.load().await)?;
    Ok(Json(ApiResponse::success(items.snapshot())))
}

/// POST /api/admin/menu-items - add an item from the form draft
pub async fn create(
    admin: AdminSession,
    Json(draft): Json<MenuItemDraft>,
) -> AdminResult<Json<ApiResponse<MenuItemPanel>>> {
    let items = &admin.dashboard.menu_items;
    admin.guard(items.add(draft).await)?;
    Ok(Json(ApiResponse::success(items.snapshot())))
}

/// DELETE /api/admin/menu-items/{id}?confirm=true - delete an item
pub async fn delete(
    admin: AdminSession,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AdminResult<Json<ApiResponse<MenuItemPanel>>> {
    let items = &admin.dashboard.menu_items;
    if !admin.guard(items.delete(&id, &query.confirm).await)? {
        return Err(AppError::confirmation_required().into());
    }
    Ok(Json(ApiResponse::success(items.snapshot())))
}

/// POST /api/admin/menu-items/{id}/availability - flip availability
pub async fn toggle_availability(
    admin: AdminSession,
    Path(id): Path<String>,
) -> AdminResult<Json<ApiResponse<MenuItemPanel>>> {
    let items = &admin.dashboard.menu_items;
    let now_available = admin.guard(items.toggle_availability(&id).await)?;
    Ok(Json(ApiResponse::success_with_message(
        if now_available { "available" } else { "unavailable" },
        items.snapshot(),
    )))
}
