//! Router extension for oneshot calls
//!
//! Calls the router directly without going through the network stack.

use axum::Router;
use axum::body::Body;
use http::{Request, Response};
use tower::ServiceExt;

use crate::core::ServerState;

/// Result type for oneshot API calls
pub type OneshotResult = Result<Response<Body>, std::convert::Infallible>;

/// Extension trait for Router to support oneshot calls
///
/// # Example
///
/// ```ignore
/// let request = Request::builder().uri("/health").body(Body::empty())?;
/// let response = build_app().call_oneshot(&state, request).await?;
/// ```
#[async_trait::async_trait]
pub trait OneshotRouter {
    async fn call_oneshot(&self, state: &ServerState, request: Request<Body>) -> OneshotResult;
}

#[async_trait::async_trait]
impl OneshotRouter for Router<ServerState> {
    async fn call_oneshot(&self, state: &ServerState, request: Request<Body>) -> OneshotResult {
        let app: Router = self.clone().with_state(state.clone());
        app.oneshot(request).await
    }
}
