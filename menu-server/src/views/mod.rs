//! Headless views
//!
//! Each view keeps its state behind a short `parking_lot` critical section,
//! talks to the backend through the `menu-client` traits and renders into a
//! serializable snapshot from `shared::view`.
//!
//! - [`SessionGate`] - admits or redirects, follows session changes
//! - [`LoginForm`] - credentials to session
//! - [`CategoryManager`] - list / add / delete categories
//! - [`MenuItemManager`] - load / add / toggle / delete menu items
//! - [`PublicMenu`] - anonymous menu for guests
//! - [`Dashboard`] - gate + both managers + logout

pub mod busy;
pub mod category_manager;
pub mod dashboard;
pub mod item_manager;
pub mod login_form;
pub mod navigation;
pub mod public_menu;
pub mod session_gate;

pub use busy::{BusyFlag, BusyGuard};
pub use category_manager::CategoryManager;
pub use dashboard::Dashboard;
pub use item_manager::MenuItemManager;
pub use login_form::{LoginForm, LoginFormView};
pub use navigation::{Confirm, Navigator, RouteSlot};
pub use public_menu::{PublicMenu, build_display_menu, price_label};
pub use session_gate::SessionGate;
