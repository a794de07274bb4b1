//! Merchant configuration

use std::path::PathBuf;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Merchant credentials and callback settings.
///
/// Bound once by `MiddlewareFactory` and shared read-only by every pipeline
/// it creates.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    /// API key shared with the gateway; signs notifications and derives the
    /// refund decryption key
    pub partner_key: Secret<String>,

    /// Application id the notifications must carry (`appid`)
    pub app_id: String,

    /// Merchant id the notifications must carry (`mch_id`)
    pub mch_id: String,

    /// Sub-merchant id for service-provider mode (`sub_mch_id`)
    #[serde(default)]
    pub sub_mch_id: Option<String>,

    /// Public URL the gateway posts notifications to
    pub notify_url: String,

    /// Location of the merchant's PKCS#12 certificate bundle.
    ///
    /// Part of the merchant record only; the notification pipelines never
    /// read it.
    #[serde(default)]
    pub pfx_path: Option<PathBuf>,
}

impl MerchantConfig {
    /// Validate merchant configuration
    ///
    /// In production, requires HTTPS for the notify URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.partner_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PARTNER_KEY"));
        }
        if self.app_id.is_empty() {
            return Err(ValidationError::MissingRequired("APP_ID"));
        }
        if self.mch_id.is_empty() {
            return Err(ValidationError::MissingRequired("MCH_ID"));
        }
        if self.notify_url.is_empty() {
            return Err(ValidationError::MissingRequired("NOTIFY_URL"));
        }

        let has_scheme =
            self.notify_url.starts_with("https://") || self.notify_url.starts_with("http://");
        if !has_scheme {
            return Err(ValidationError::InvalidNotifyUrl(self.notify_url.clone()));
        }
        if *environment == Environment::Production && !self.notify_url.starts_with("https://") {
            return Err(ValidationError::NotifyUrlMustBeHttps);
        }

        Ok(())
    }
}
