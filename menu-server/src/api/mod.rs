//! API routes
//!
//! - [`health`] - liveness
//! - [`auth`] - login / logout
//! - [`dashboard`] - admin dashboard snapshot
//! - [`categories`] - category manager
//! - [`menu_items`] - menu item manager
//! - [`menu`] - public menu

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod menu;
pub mod menu_items;

pub use shared::AppResult;
