//! Handler-side types for the plain pipeline.
//!
//! Handlers behind `plain_notify_middleware` extract the `ValidatedMessage`
//! and return a `NotifyReply`. The reply does not render itself: it leaves
//! an `Outcome` in the response extensions, which the middleware hands to
//! the envelope.
//!
//! ```ignore
//! async fn on_payment(message: ValidatedMessage) -> NotifyReply {
//!     orders.mark_paid(message.get("out_trade_no"))?;
//!     Ok(Ack::new())
//! }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::notification::{Ack, NotifyError, Outcome, ValidatedMessage};

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        carrying(StatusCode::OK, Outcome::Success(self))
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        carrying(StatusCode::INTERNAL_SERVER_ERROR, Outcome::Failure(self))
    }
}

fn carrying(status: StatusCode, outcome: Outcome) -> Response {
    let mut response = status.into_response();
    response.extensions_mut().insert(outcome);
    response
}

/// Reads the message injected by `plain_notify_middleware`.
///
/// Outside the middleware the extractor rejects, so an unprotected route
/// never sees a message.
impl<S> axum::extract::FromRequestParts<S> for ValidatedMessage
where
    S: Send + Sync,
{
    type Rejection = NotifyError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<ValidatedMessage>()
                .cloned()
                .ok_or_else(|| {
                    NotifyError::handler("HandlerError", "no validated notification on request")
                })
        })
    }
}
