//! Client configuration

use crate::{ClientError, ClientResult, RemoteBackend};

/// Default capacity of the session-change broadcast channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Client configuration for connecting to the hosted backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project base URL (e.g., "https://xyzcompany.supabase.co")
    pub base_url: String,

    /// Public anonymous API key, sent as `apikey` on every request
    pub anon_key: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Capacity of the session-change notification channel
    pub event_capacity: usize,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            timeout: 30,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the notification channel capacity
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Check that the required values are present
    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("backend URL is not set".into()));
        }
        if self.anon_key.trim().is_empty() {
            return Err(ClientError::Config("backend anon key is not set".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "backend URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("request timeout must be at least one second".into()));
        }
        Ok(())
    }

    /// Create a remote backend client from this configuration
    pub fn build_remote(&self) -> ClientResult<RemoteBackend> {
        RemoteBackend::new(self)
    }
}
