//! Notification payload types.
//!
//! A payload moves through three shapes: [`RawNotification`] (unverified
//! text), [`ValidatedMessage`] (fields that passed the authenticity check),
//! and, for refunds, [`RefundResult`] (the decrypted section).

use std::collections::BTreeMap;

use super::errors::ReadError;

/// Flat field mapping of a notification document.
pub type Fields = BTreeMap<String, String>;

/// Wire name of the encrypted refund section.
pub const REQ_INFO_FIELD: &str = "req_info";

/// Alternate name accepted for the encrypted refund section.
pub const ENCRYPTED_INFO_FIELD: &str = "encrypted_info";

/// Request body as received, decoded to text. Not trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNotification(String);

impl RawNotification {
    /// Wraps decoded body text.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::EmptyBody` for an empty or whitespace-only body.
    pub fn new(text: impl Into<String>) -> Result<Self, ReadError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ReadError::EmptyBody);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Notification fields that passed the authenticity check.
///
/// Only `NotificationValidator` constructs this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage(Fields);

impl ValidatedMessage {
    pub(crate) fn authenticated(fields: Fields) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }

    /// Encrypted refund section, if present and non-empty.
    pub fn encrypted_info(&self) -> Option<&str> {
        [REQ_INFO_FIELD, ENCRYPTED_INFO_FIELD]
            .iter()
            .filter_map(|name| self.get(name))
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

/// Decrypted refund section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundResult(Fields);

impl RefundResult {
    pub(crate) fn decrypted(fields: Fields) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }
}
