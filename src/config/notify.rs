//! Notification endpoint configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hard ceiling accepted for `body_limit_bytes` (16 MiB).
pub const MAX_BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// Hard ceiling accepted for `read_timeout_secs`.
pub const MAX_READ_TIMEOUT_SECS: u64 = 120;

/// Hard ceiling accepted for `request_timeout_secs`.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Notification endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    /// Deadline for receiving the whole body, in seconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Deadline for the whole notification, handler included, in seconds.
    /// Must exceed `read_timeout_secs`.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Route serving payment notifications
    #[serde(default = "default_notify_path")]
    pub notify_path: String,

    /// Route serving refund notifications
    #[serde(default = "default_refund_path")]
    pub refund_path: String,
}

/// Bounds applied to each notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyLimits {
    pub max_body_bytes: usize,
    /// Body must arrive within this; expiry answers `BadMessageRequestTimeout`.
    pub read_timeout: Duration,
    /// Whole request, handler included; expiry answers `RequestTimeout`.
    pub request_timeout: Duration,
}

impl Default for NotifyLimits {
    fn default() -> Self {
        Self {
            max_body_bytes: default_body_limit(),
            read_timeout: Duration::from_secs(default_read_timeout()),
            request_timeout: Duration::from_secs(default_request_timeout()),
        }
    }
}

impl NotifyConfig {
    /// Body-read bounds for the pipelines
    pub fn limits(&self) -> NotifyLimits {
        NotifyLimits {
            max_body_bytes: self.body_limit_bytes,
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.body_limit_bytes == 0 || self.body_limit_bytes > MAX_BODY_LIMIT_BYTES {
            return Err(ValidationError::InvalidBodyLimit {
                max: MAX_BODY_LIMIT_BYTES,
            });
        }
        if self.read_timeout_secs == 0 || self.read_timeout_secs > MAX_READ_TIMEOUT_SECS {
            return Err(ValidationError::InvalidReadTimeout {
                max: MAX_READ_TIMEOUT_SECS,
            });
        }
        if self.request_timeout_secs <= self.read_timeout_secs
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ValidationError::InvalidRequestTimeout {
                read_timeout_secs: self.read_timeout_secs,
                max: MAX_REQUEST_TIMEOUT_SECS,
            });
        }
        for path in [&self.notify_path, &self.refund_path] {
            if !path.starts_with('/') {
                return Err(ValidationError::InvalidRoutePath(path.clone()));
            }
        }
        if self.notify_path == self.refund_path {
            return Err(ValidationError::DuplicateRoutePath);
        }
        Ok(())
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: default_body_limit(),
            read_timeout_secs: default_read_timeout(),
            request_timeout_secs: default_request_timeout(),
            notify_path: default_notify_path(),
            refund_path: default_refund_path(),
        }
    }
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_read_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_notify_path() -> String {
    "/notify".to_string()
}

fn default_refund_path() -> String {
    "/refund-notify".to_string()
}
