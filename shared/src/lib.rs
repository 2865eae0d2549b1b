//! Shared types for the restaurant menu workspace
//!
//! Common types used across menu-client and menu-server including the
//! data model, session types, view snapshots, error types and response
//! structures.

pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod util;
pub mod view;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use session::{AuthEvent, AuthUser, Credentials, Session};
pub use view::Route;
