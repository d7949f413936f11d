//! Gateway error types.

use thiserror::Error;

/// Errors raised while starting or running the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// The HTTP server stopped with an error
    #[error("server error: {0}")]
    Server(String),

    /// HTTP serving is disabled in the configuration
    #[error("http server disabled")]
    Disabled,
}

impl From<super::config::ConfigError> for GatewayError {
    fn from(err: super::config::ConfigError) -> Self {
        GatewayError::Config(err.to_string())
    }
}
