//! Utilities
//!
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - form input checks

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
