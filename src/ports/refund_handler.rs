//! Business handler port for decrypted refund notifications.

use std::future::Future;

use async_trait::async_trait;

use crate::domain::notification::{Ack, NotifyError, RefundResult, ValidatedMessage};

/// Downstream handler invoked once per authenticated, decrypted refund.
///
/// The returned result becomes the acknowledgement: `Ok` renders `SUCCESS`
/// with the ack fields, `Err` renders `FAIL` with the error kind.
#[async_trait]
pub trait RefundHandler: Send + Sync {
    async fn handle(
        &self,
        refund: RefundResult,
        message: ValidatedMessage,
    ) -> Result<Ack, NotifyError>;
}

#[async_trait]
impl<F, Fut> RefundHandler for F
where
    F: Fn(RefundResult, ValidatedMessage) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Ack, NotifyError>> + Send + 'static,
{
    async fn handle(
        &self,
        refund: RefundResult,
        message: ValidatedMessage,
    ) -> Result<Ack, NotifyError> {
        (self)(refund, message).await
    }
}
