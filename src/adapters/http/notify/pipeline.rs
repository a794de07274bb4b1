//! Stages shared by both notification pipelines.
//!
//! ```text
//! MethodCheck → BodyRead → Validate ─┬─ plain:  extensions → next handler
//!                                    └─ refund: Decrypt → RefundHandler
//! ```
//!
//! Every branch ends in the same `ResponseEnvelope`.

use std::future::Future;

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::Method;
use axum::response::Response;

use super::body::read_notification;
use crate::application::notify::{NotificationValidator, ResponseEnvelope};
use crate::config::NotifyLimits;
use crate::domain::notification::{Ack, NotifyError, Outcome, ValidatedMessage};

/// Completion operations shared by the plain and refund pipelines.
pub trait NotificationPipeline {
    fn envelope(&self) -> &ResponseEnvelope;

    fn success(&self, ack: &Ack) -> Response {
        self.envelope().success(ack)
    }

    fn fail(&self, error: &NotifyError) -> Response {
        if error.is_rejection() {
            tracing::warn!(kind = %error.kind(), error = %error, "Notification rejected");
        } else {
            tracing::warn!(kind = %error.kind(), error = %error, "Notification processing failed");
        }
        self.envelope().fail(error)
    }

    fn complete(&self, outcome: Outcome) -> Response {
        match outcome {
            Outcome::Success(ack) => self.success(&ack),
            Outcome::Failure(error) => self.fail(&error),
        }
    }
}

/// MethodCheck, BodyRead and Validate, bound to one merchant.
#[derive(Clone)]
pub struct PipelineCore {
    validator: NotificationValidator,
    envelope: ResponseEnvelope,
    limits: NotifyLimits,
}

impl PipelineCore {
    pub fn new(
        validator: NotificationValidator,
        envelope: ResponseEnvelope,
        limits: NotifyLimits,
    ) -> Self {
        Self {
            validator,
            envelope,
            limits,
        }
    }

    pub fn envelope(&self) -> &ResponseEnvelope {
        &self.envelope
    }

    pub fn limits(&self) -> &NotifyLimits {
        &self.limits
    }

    /// Runs the stages every notification passes through.
    ///
    /// The body of a non-POST request is never read.
    pub async fn accept(&self, request: Request) -> Result<(Parts, ValidatedMessage), NotifyError> {
        if request.method() != Method::POST {
            return Err(NotifyError::NotImplemented);
        }

        let (parts, body) = request.into_parts();
        let raw = read_notification(&parts.headers, body, &self.limits).await?;
        tracing::debug!(bytes = raw.len(), "Notification body read");

        let message = self.validator.validate(&raw)?;
        Ok((parts, message))
    }

    /// Bounds a whole request, handler included, by `request_timeout`.
    ///
    /// An expired deadline becomes `NotifyError::Timeout` so it is still
    /// answered through the envelope.
    pub async fn within_deadline<F>(&self, work: F) -> Outcome
    where
        F: Future<Output = Outcome>,
    {
        let deadline = self.limits.request_timeout;
        match tokio::time::timeout(deadline, work).await {
            Ok(outcome) => outcome,
            Err(_) => Outcome::Failure(NotifyError::Timeout(deadline)),
        }
    }
}
