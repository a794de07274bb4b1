//! PlainPipeline - payment notifications.
//!
//! Runs as middleware in front of an ordinary axum handler. The handler is
//! only reached with an authenticated message; whatever it returns is turned
//! into the gateway acknowledgement.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{any, MethodRouter};

use super::pipeline::{NotificationPipeline, PipelineCore};
use crate::application::notify::ResponseEnvelope;
use crate::domain::notification::{Ack, NotifyError, Outcome};

/// Method check, body read and validation in front of a plain handler.
#[derive(Clone)]
pub struct PlainPipeline {
    core: PipelineCore,
}

impl PlainPipeline {
    pub fn new(core: PipelineCore) -> Self {
        Self { core }
    }
}

impl NotificationPipeline for PlainPipeline {
    fn envelope(&self) -> &ResponseEnvelope {
        self.core.envelope()
    }
}

/// Middleware for the plain pipeline.
///
/// 1. Rejects anything but POST with `NotImplemented`
/// 2. Reads and validates the body
/// 3. Injects `ValidatedMessage` into the request extensions
/// 4. Renders the handler's `NotifyReply` through the envelope
///
/// All of it runs under the request deadline; running out of time is
/// answered with `FAIL / RequestTimeout`.
///
/// The downstream handler receives an empty body; the notification is
/// available only through the extracted message.
pub async fn plain_notify_middleware(
    State(pipeline): State<PlainPipeline>,
    request: Request,
    next: Next,
) -> Response {
    let outcome = pipeline
        .core
        .within_deadline(dispatch(&pipeline.core, request, next))
        .await;
    pipeline.complete(outcome)
}

async fn dispatch(core: &PipelineCore, request: Request, next: Next) -> Outcome {
    let (mut parts, message) = match core.accept(request).await {
        Ok(accepted) => accepted,
        Err(error) => return Outcome::Failure(error),
    };

    parts.extensions.insert(message);
    let mut response = next.run(Request::from_parts(parts, Body::empty())).await;

    match response.extensions_mut().remove::<Outcome>() {
        Some(outcome) => outcome,
        // Handler returned something other than a NotifyReply
        None if response.status().is_success() => Outcome::Success(Ack::new()),
        None => Outcome::Failure(NotifyError::handler(
            "HandlerError",
            format!("handler responded {}", response.status()),
        )),
    }
}

/// Wraps `handler` in the plain pipeline, accepting every method so that
/// non-POST requests are answered in-protocol.
pub fn plain_notify_route<H, T, S>(pipeline: PlainPipeline, handler: H) -> MethodRouter<S>
where
    H: Handler<T, ()>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    any(handler)
        .layer(middleware::from_fn_with_state(
            pipeline,
            plain_notify_middleware,
        ))
        .with_state(())
}
