//! Menu Client - client for the hosted restaurant backend
//!
//! Talks to the backend-as-a-service that stores the menu: password
//! authentication with session-change events, and the `categories` /
//! `menu_items` tables. An in-process implementation of the same seams is
//! available behind the `in-process` feature.

pub mod auth_events;
pub mod backend;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "in-process")]
pub mod memory;
pub mod query;
pub mod remote;

pub use auth_events::{AuthEvents, AuthSubscription};
pub use backend::{AuthService, Backend, MenuStore};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
#[cfg(feature = "in-process")]
pub use memory::{MemoryBackend, StoreOp};
pub use query::TableQuery;
pub use remote::RemoteBackend;

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, LoginRequest};
pub use shared::{AuthEvent, AuthUser, Credentials, Session};
