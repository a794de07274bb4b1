//! Payment gateway port.
//!
//! Owns the gateway's authenticity scheme and its XML envelope format. The
//! notification pipelines never inspect either; they only call through here.

use crate::domain::notification::{AuthError, EnvelopeError, Fields};

/// Port for the gateway's notification protocol.
pub trait PaymentGateway: Send + Sync {
    /// Authenticates a raw notification and returns its fields.
    ///
    /// Must verify the signature before returning anything. A payload that
    /// cannot be parsed into candidate fields fails with `AuthError::InvalidXml`.
    fn validate(&self, raw: &str) -> Result<Fields, AuthError>;

    /// Serializes acknowledgement fields, in order, as a gateway XML document.
    fn build_xml(&self, fields: &[(String, String)]) -> Result<String, EnvelopeError>;
}
