//! HTTP adapter for gateway notifications.
//!
//! Two pipelines, both answering every exit path with a gateway
//! acknowledgement (`<xml><return_code>…</return_code>…</xml>`):
//!
//! - `PlainPipeline` - middleware in front of a payment handler that
//!   extracts `ValidatedMessage` and returns `NotifyReply`
//! - `EncryptedPipeline` - refund handler fed the decrypted `RefundResult`
//!
//! `MiddlewareFactory` binds the merchant and hands out both.

mod body;
mod factory;
mod pipeline;
mod plain;
mod refund;
mod reply;
mod routes;

pub use body::{read_notification, Charset};
pub use factory::MiddlewareFactory;
pub use pipeline::{NotificationPipeline, PipelineCore};
pub use plain::{plain_notify_middleware, plain_notify_route, PlainPipeline};
pub use refund::{refund_notify_handler, refund_notify_route, EncryptedPipeline};
pub use routes::notify_router;
