use thiserror::Error;

/// Startup and serving errors
///
/// Request-level failures use [`shared::AppError`]; this type only covers
/// what can stop the process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<menu_client::ClientError> for ServerError {
    fn from(err: menu_client::ClientError) -> Self {
        match err {
            menu_client::ClientError::Config(msg) => Self::Config(msg),
            other => Self::Internal(anyhow::anyhow!(other)),
        }
    }
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;
