//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query},
};
use shared::client::{AddCategoryRequest, ConfirmQuery};
use shared::view::CategoryPanel;
use shared::{ApiResponse, AppError};

use crate::auth::{AdminResult, AdminSession};

/// GET /api/admin/categories - list categories
pub async fn list(admin: AdminSession) -> AdminResult<Json<ApiResponse<CategoryPanel>>> {
    let categories = &admin.dashboard.categories;
    admin.guard(categories.list().await)?;
    Ok(Json(ApiResponse::success(categories.snapshot())))
}

/// POST /api/admin/categories - add a category
pub async fn create(
    admin: AdminSession,
    Json(payload): Json<AddCategoryRequest>,
) -> AdminResult<Json<ApiResponse<CategoryPanel>>> {
    let categories = &admin.dashboard.categories;
    admin.guard(categories.add(&payload.name).await)?;
    Ok(Json(ApiResponse::success(categories.snapshot())))
}

/// DELETE /api/admin/categories/{id}?confirm=true - delete a category
pub async fn delete(
    admin: AdminSession,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AdminResult<Json<ApiResponse<CategoryPanel>>> {
    let categories = &admin.dashboard.categories;
    if !admin.guard(categories.delete(&id, &query.confirm).await)? {
        return Err(AppError::confirmation_required().into());
    }
    Ok(Json(ApiResponse::success(categories.snapshot())))
}
