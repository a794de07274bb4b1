//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAYGATE_NOTIFY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paygate_notify::config::AppConfig;
//!
//! let config = AppConfig::load_validated().expect("Invalid configuration");
//!
//! println!("Notifications served on {}", config.notify.notify_path);
//! ```

mod error;
mod merchant;
mod notify;
mod server;

pub use error::{ConfigError, ValidationError};
pub use merchant::MerchantConfig;
pub use notify::{
    NotifyConfig, NotifyLimits, MAX_BODY_LIMIT_BYTES, MAX_READ_TIMEOUT_SECS,
    MAX_REQUEST_TIMEOUT_SECS,
};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Merchant credentials bound into the notification pipelines
    pub merchant: MerchantConfig,

    /// Notification endpoint settings (body limits, routes)
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYGATE_NOTIFY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYGATE_NOTIFY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PAYGATE_NOTIFY__MERCHANT__MCH_ID=...` -> `merchant.mch_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYGATE_NOTIFY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step, as the binary does at startup
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when loading fails and
    /// `ConfigError::ValidationFailed` when a loaded value is invalid.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.merchant.validate(&self.server.environment)?;
        self.notify.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

/// Merchant fixture shared by unit tests.
#[cfg(test)]
pub(crate) fn test_merchant() -> MerchantConfig {
    MerchantConfig {
        partner_key: secrecy::Secret::new("192006250b4c09247ec02edce69f6a2d".to_string()),
        app_id: "wx2421b1c4370ec43b".to_string(),
        mch_id: "10000100".to_string(),
        sub_mch_id: None,
        notify_url: "https://merchant.example.com/notify".to_string(),
        pfx_path: None,
    }
}
