//! Data models
//!
//! Row types of the hosted backend's `categories` and `menu_items` tables,
//! their insert/update payloads, and the public menu shapes.
//! Identifiers are opaque strings assigned by the backend.

pub mod category;
pub mod menu_item;
pub mod public_menu;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use public_menu::*;
