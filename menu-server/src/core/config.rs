use menu_client::ClientConfig;

use crate::core::{Result, ServerError};

/// Which backend implementation the server talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Hosted backend over HTTP
    Remote,
    /// In-process tables, nothing persisted
    Memory,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Memory => "memory",
        }
    }
}

impl std::str::FromStr for BackendMode {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "memory" => Ok(Self::Memory),
            other => Err(ServerError::Config(format!("unknown BACKEND_MODE: {other}"))),
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | BACKEND_MODE | remote | `remote` or `memory` |
/// | BACKEND_URL | - | Hosted backend base URL (remote mode) |
/// | BACKEND_ANON_KEY | - | Public anon key (remote mode) |
/// | REQUEST_TIMEOUT_MS | 30000 | Backend request timeout, at least one second |
/// | DASHBOARD_IDLE_SECS | 3600 | Unused admin dashboards are unmounted after this |
/// | LOG_LEVEL | info | Log level / filter directive |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | - | Daily-rolling log file directory |
/// | CURRENCY_SUFFIX | TL | Suffix of public menu price labels |
/// | MEMORY_ADMIN_EMAIL | - | Admin account seeded in memory mode |
/// | MEMORY_ADMIN_PASSWORD | - | Password of that account |
///
/// # Example
///
/// ```ignore
/// BACKEND_URL=https://xyz.supabase.co BACKEND_ANON_KEY=... HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub environment: String,
    pub backend_mode: BackendMode,
    pub backend_url: Option<String>,
    pub backend_anon_key: Option<String>,
    pub request_timeout_ms: u64,
    pub dashboard_idle_secs: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub currency_suffix: String,
    pub memory_admin_email: Option<String>,
    pub memory_admin_password: Option<String>,
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to their defaults. An unknown
    /// `BACKEND_MODE` falls back to remote with a warning.
    pub fn from_env() -> Self {
        let backend_mode = match non_empty_var("BACKEND_MODE") {
            Some(mode) => mode.parse().unwrap_or_else(|e: ServerError| {
                tracing::warn!(error = %e, "Falling back to remote backend");
                BackendMode::Remote
            }),
            None => BackendMode::Remote,
        };

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            backend_mode,
            backend_url: non_empty_var("BACKEND_URL"),
            backend_anon_key: non_empty_var("BACKEND_ANON_KEY"),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(30000),
            dashboard_idle_secs: std::env::var("DASHBOARD_IDLE_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(3600),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_empty_var("LOG_DIR"),
            currency_suffix: std::env::var("CURRENCY_SUFFIX").unwrap_or_else(|_| "TL".into()),
            memory_admin_email: non_empty_var("MEMORY_ADMIN_EMAIL"),
            memory_admin_password: non_empty_var("MEMORY_ADMIN_PASSWORD"),
        }
    }

    /// In-memory configuration, used by tests
    pub fn memory() -> Self {
        Self {
            http_port: 0,
            environment: "test".into(),
            backend_mode: BackendMode::Memory,
            backend_url: None,
            backend_anon_key: None,
            request_timeout_ms: 30000,
            dashboard_idle_secs: 3600,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            currency_suffix: "TL".into(),
            memory_admin_email: None,
            memory_admin_password: None,
        }
    }

    /// Client configuration for the hosted backend
    ///
    /// Fails when the URL or anon key is missing. The timeout is rounded up
    /// to whole seconds and never drops below one.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let url = self
            .backend_url
            .as_deref()
            .ok_or_else(|| ServerError::Config("BACKEND_URL is required in remote mode".into()))?;
        let key = self
            .backend_anon_key
            .as_deref()
            .ok_or_else(|| ServerError::Config("BACKEND_ANON_KEY is required in remote mode".into()))?;

        let config = ClientConfig::new(url, key).with_timeout(self.request_timeout_ms.div_ceil(1000).max(1));
        config
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
