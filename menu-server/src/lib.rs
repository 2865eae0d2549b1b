//! Menu Server - restaurant menu admin and public menu
//!
//! # Overview
//!
//! - **Views** (`views`): headless session gate, login form, category and
//!   menu item managers, public menu renderer, dashboard
//! - **Auth** (`auth`): extractor that runs the session gate per request
//! - **HTTP API** (`api`): axum routes exposing the views as JSON
//! - **Core** (`core`): configuration, state, server
//!
//! All data and authentication live in the hosted backend, reached through
//! `menu-client`.
//!
//! ```text
//! menu-server/src/
//! ├── core/     # config, state, server, errors
//! ├── views/    # headless views
//! ├── auth/     # session gate extractor
//! ├── api/      # HTTP handlers
//! ├── routes/   # router assembly, oneshot
//! └── utils/    # logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod routes;
pub mod utils;
pub mod views;

pub use auth::AdminSession;
pub use crate::core::{BackendMode, Config, Server, ServerError, ServerState};
pub use routes::{OneshotRouter, build_app};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> crate::core::Result<Config> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(ServerError::Config(format!("failed to read .env: {e}")));
    }

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    api::health::mark_start();
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  __  __
 |  \/  | ___ _ __  _   _
 | |\/| |/ _ \ '_ \| | | |
 | |  | |  __/ | | | |_| |
 |_|  |_|\___|_| |_|\__,_|
    "#
    );
}
