//! Menu item API module (gated)

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::load).post(handler::create))
        .route("/{id}", delete(handler::delete))
        .route("/{id}/availability", post(handler::toggle_availability))
}
