//! ResponseEnvelope - renders acknowledgements for the gateway.
//!
//! Every notification ends in exactly one call to [`ResponseEnvelope::success`]
//! or [`ResponseEnvelope::fail`]. Both answer HTTP 200; the gateway reads the
//! outcome from `return_code`.

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::domain::notification::{Ack, EnvelopeError, NotifyError, Outcome};
use crate::ports::PaymentGateway;

pub const RETURN_CODE: &str = "return_code";
pub const RETURN_MSG: &str = "return_msg";
pub const SUCCESS: &str = "SUCCESS";
pub const FAIL: &str = "FAIL";

/// Content type of every acknowledgement.
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Body sent when the acknowledgement itself cannot be rendered.
const ENVELOPE_FAILURE_BODY: &str =
    "<xml><return_code>FAIL</return_code><return_msg>EnvelopeError</return_msg></xml>";

/// Builds `SUCCESS` / `FAIL` acknowledgements through the gateway serializer.
#[derive(Clone)]
pub struct ResponseEnvelope {
    gateway: Arc<dyn PaymentGateway>,
}

impl ResponseEnvelope {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// `{return_code: SUCCESS, ...ack}`. An ack field named `return_code` is dropped.
    pub fn success_body(&self, ack: &Ack) -> Result<String, EnvelopeError> {
        let mut fields = Vec::with_capacity(ack.fields().len() + 1);
        fields.push((RETURN_CODE.to_string(), SUCCESS.to_string()));
        fields.extend(
            ack.fields()
                .iter()
                .filter(|(name, _)| name != RETURN_CODE)
                .cloned(),
        );
        self.gateway.build_xml(&fields)
    }

    /// `{return_code: FAIL, return_msg: kind}`.
    pub fn fail_body(&self, error: &NotifyError) -> Result<String, EnvelopeError> {
        let fields = [
            (RETURN_CODE.to_string(), FAIL.to_string()),
            (RETURN_MSG.to_string(), error.kind().into_owned()),
        ];
        self.gateway.build_xml(&fields)
    }

    pub fn success(&self, ack: &Ack) -> Response {
        respond(self.success_body(ack))
    }

    pub fn fail(&self, error: &NotifyError) -> Response {
        respond(self.fail_body(error))
    }

    pub fn render(&self, outcome: &Outcome) -> Response {
        match outcome {
            Outcome::Success(ack) => self.success(ack),
            Outcome::Failure(error) => self.fail(error),
        }
    }
}

fn respond(body: Result<String, EnvelopeError>) -> Response {
    match body {
        Ok(xml) => (StatusCode::OK, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render notification acknowledgement");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
                ENVELOPE_FAILURE_BODY,
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::wechat::WechatPayment;
    use crate::config::test_merchant;
    use crate::domain::notification::{AuthError, ReadError};

    fn envelope() -> ResponseEnvelope {
        ResponseEnvelope::new(Arc::new(WechatPayment::new(Arc::new(test_merchant()))))
    }

    // ══════════════════════════════════════════════════════════════
    // Body Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn plain_success() {
        assert_eq!(
            envelope().success_body(&Ack::new()).unwrap(),
            "<xml><return_code>SUCCESS</return_code></xml>"
        );
    }

    #[test]
    fn success_carries_ack_fields_after_return_code() {
        let body = envelope()
            .success_body(&Ack::new().with("out_trade_no", "X"))
            .unwrap();
        assert_eq!(
            body,
            "<xml><return_code>SUCCESS</return_code><out_trade_no>X</out_trade_no></xml>"
        );
    }

    #[test]
    fn success_ignores_ack_return_code() {
        let body = envelope()
            .success_body(&Ack::new().with("return_code", "FAIL").with("return_msg", "OK"))
            .unwrap();
        assert_eq!(
            body,
            "<xml><return_code>SUCCESS</return_code><return_msg>OK</return_msg></xml>"
        );
    }

    #[test]
    fn not_implemented_failure() {
        assert_eq!(
            envelope().fail_body(&NotifyError::NotImplemented).unwrap(),
            "<xml><return_code>FAIL</return_code><return_msg>NotImplemented</return_msg></xml>"
        );
    }

    #[test]
    fn failure_uses_stable_kind() {
        let body = envelope()
            .fail_body(&NotifyError::from(AuthError::ProtocolError(
                "long gateway message".to_string(),
            )))
            .unwrap();
        assert_eq!(
            body,
            "<xml><return_code>FAIL</return_code><return_msg>BadMessageProtocolError</return_msg></xml>"
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Response Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn responses_are_ok_with_xml_content_type() {
        let response = envelope().fail(&NotifyError::from(ReadError::EmptyBody));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            XML_CONTENT_TYPE
        );
    }

    #[test]
    fn unrenderable_ack_is_server_error() {
        let response = envelope().success(&Ack::new().with("not a name", "x"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn render_dispatches_on_outcome() {
        let response = envelope().render(&Outcome::Success(Ack::new()));
        assert_eq!(response.status(), StatusCode::OK);
    }
}
