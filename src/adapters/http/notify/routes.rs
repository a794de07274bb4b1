//! Router wiring for the notification endpoints.

use axum::handler::Handler;
use axum::Router;

use super::factory::MiddlewareFactory;
use super::plain::plain_notify_route;
use super::refund::refund_notify_route;
use crate::config::NotifyConfig;
use crate::ports::RefundHandler;

/// Create the notification router.
///
/// # Routes
/// - `{notify_path}` - payment notifications, plain pipeline in front of `on_payment`
/// - `{refund_path}` - refund notifications, encrypted pipeline calling `on_refund`
///
/// Both routes accept every method; anything but POST is answered with
/// `FAIL / NotImplemented`.
pub fn notify_router<H, T, R, S>(
    factory: &MiddlewareFactory,
    config: &NotifyConfig,
    on_payment: H,
    on_refund: R,
) -> Router<S>
where
    H: Handler<T, ()>,
    T: 'static,
    R: RefundHandler + 'static,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            &config.notify_path,
            plain_notify_route(factory.notify(), on_payment),
        )
        .route(
            &config.refund_path,
            refund_notify_route(factory.refund_notify(on_refund)),
        )
}
