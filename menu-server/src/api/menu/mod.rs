//! Public menu route (no session)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use shared::view::PublicMenuView;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/menu/{restaurant_id}", get(show))
}

/// GET /menu/{restaurant_id} - render the guest menu
///
/// Empty menus are a normal 200; a failed fetch renders the error state
/// with 502.
pub async fn show(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> (StatusCode, Json<PublicMenuView>) {
    let view = state.public_menu.render(&restaurant_id).await;
    let status = if view.is_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(view))
}
