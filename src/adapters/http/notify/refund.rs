//! EncryptedPipeline - refund notifications.
//!
//! Refund callbacks carry the interesting fields in an AES-encrypted `req_info`
//! section. The pipeline authenticates the outer document, decrypts and parses
//! the section, and calls the `RefundHandler` with the decrypted result.
//! Decryption or parse failures never reach the handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::Response;
use axum::routing::{any, MethodRouter};

use super::pipeline::{NotificationPipeline, PipelineCore};
use crate::application::notify::{RefundDecoder, ResponseEnvelope};
use crate::domain::notification::{NotifyReply, Outcome};
use crate::ports::RefundHandler;

#[derive(Clone)]
pub struct EncryptedPipeline {
    core: PipelineCore,
    decoder: Arc<RefundDecoder>,
    handler: Arc<dyn RefundHandler>,
}

impl EncryptedPipeline {
    pub fn new(
        core: PipelineCore,
        decoder: Arc<RefundDecoder>,
        handler: Arc<dyn RefundHandler>,
    ) -> Self {
        Self {
            core,
            decoder,
            handler,
        }
    }

    /// Processes one request end to end under the request deadline.
    /// Always yields an acknowledgement.
    pub async fn run(&self, request: Request) -> Response {
        let outcome = self
            .core
            .within_deadline(async { Outcome::from(self.process(request).await) })
            .await;
        self.complete(outcome)
    }

    async fn process(&self, request: Request) -> NotifyReply {
        let (_parts, message) = self.core.accept(request).await?;

        let refund = self.decoder.decode(&message)?;
        tracing::debug!(
            out_refund_no = refund.get("out_refund_no").unwrap_or("-"),
            "Refund section decrypted"
        );

        self.handler.handle(refund, message).await
    }
}

impl NotificationPipeline for EncryptedPipeline {
    fn envelope(&self) -> &ResponseEnvelope {
        self.core.envelope()
    }
}

/// Axum handler for the refund pipeline.
pub async fn refund_notify_handler(
    State(pipeline): State<EncryptedPipeline>,
    request: Request,
) -> Response {
    pipeline.run(request).await
}

/// Route serving the refund pipeline on every method.
pub fn refund_notify_route<S>(pipeline: EncryptedPipeline) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    any(refund_notify_handler).with_state(pipeline)
}
