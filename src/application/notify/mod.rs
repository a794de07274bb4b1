//! Notification services shared by both pipelines.
//!
//! - `NotificationValidator` - authenticity gate producing `ValidatedMessage`
//! - `RefundDecoder` - decrypts and re-parses the refund section
//! - `ResponseEnvelope` - renders `SUCCESS` / `FAIL` acknowledgements
//! - `acknowledge_payment`, `AcknowledgeRefund` - default business handlers

mod acknowledge;
mod envelope;
mod refund_decoder;
mod validator;

pub use acknowledge::{acknowledge_payment, AcknowledgeRefund};
pub use envelope::{
    ResponseEnvelope, FAIL, RETURN_CODE, RETURN_MSG, SUCCESS, XML_CONTENT_TYPE,
};
pub use refund_decoder::RefundDecoder;
pub use validator::NotificationValidator;
