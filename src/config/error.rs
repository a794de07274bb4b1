//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid notify URL: {0}")]
    InvalidNotifyUrl(String),

    #[error("Notify URL must use HTTPS in production")]
    NotifyUrlMustBeHttps,

    #[error("Body limit must be between 1 byte and {max} bytes")]
    InvalidBodyLimit { max: usize },

    #[error("Read timeout must be between 1 and {max} seconds")]
    InvalidReadTimeout { max: u64 },

    #[error("Request timeout must exceed the read timeout ({read_timeout_secs}s) and be at most {max} seconds")]
    InvalidRequestTimeout { read_timeout_secs: u64, max: u64 },

    #[error("Route path must start with '/': {0}")]
    InvalidRoutePath(String),

    #[error("Notify and refund routes must differ")]
    DuplicateRoutePath,
}
