//! Client-related types shared between server and client
//!
//! Request/response bodies of the application HTTP surface.

use serde::{Deserialize, Serialize};

use crate::session::Session;

// Re-export ApiResponse from the error module
pub use crate::error::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
pub use crate::session::Credentials as LoginRequest;

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session: Session,
    /// Where the login form navigates on success
    pub redirect: String,
}

/// Logout response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub redirect: String,
}

// =============================================================================
// Admin API DTOs
// =============================================================================

/// `POST /api/admin/categories` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCategoryRequest {
    pub name: String,
}

/// Query string of the destructive admin routes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}
