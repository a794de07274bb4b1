//! NotificationValidator - authenticity gate for raw notifications.

use std::sync::Arc;

use crate::domain::notification::{AuthError, RawNotification, ValidatedMessage};
use crate::ports::PaymentGateway;

/// Turns a raw notification into a `ValidatedMessage`, or refuses it.
///
/// This is the only place a `ValidatedMessage` is constructed, so holding one
/// proves the gateway's authenticity check ran and passed.
#[derive(Clone)]
pub struct NotificationValidator {
    gateway: Arc<dyn PaymentGateway>,
}

impl NotificationValidator {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub fn validate(&self, raw: &RawNotification) -> Result<ValidatedMessage, AuthError> {
        let fields = self.gateway.validate(raw.as_str())?;
        Ok(ValidatedMessage::authenticated(fields))
    }
}
