//! Default business handlers: record the notification and acknowledge it.
//!
//! Used by the binary when no application logic is wired in. Real
//! deployments replace these with handlers that update order state.

use async_trait::async_trait;

use crate::domain::notification::{Ack, NotifyError, RefundResult, ValidatedMessage};
use crate::ports::RefundHandler;

/// Plain-notification handler that logs the payment and acknowledges it.
pub async fn acknowledge_payment(message: ValidatedMessage) -> Result<Ack, NotifyError> {
    tracing::info!(
        out_trade_no = message.get("out_trade_no").unwrap_or("-"),
        transaction_id = message.get("transaction_id").unwrap_or("-"),
        total_fee = message.get("total_fee").unwrap_or("-"),
        "Payment notification accepted"
    );
    Ok(Ack::new())
}

/// Refund handler that logs the refund and acknowledges it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcknowledgeRefund;

#[async_trait]
impl RefundHandler for AcknowledgeRefund {
    async fn handle(
        &self,
        refund: RefundResult,
        _message: ValidatedMessage,
    ) -> Result<Ack, NotifyError> {
        let out_refund_no = refund
            .get("out_refund_no")
            .ok_or_else(|| NotifyError::handler("MissingRefundNo", "out_refund_no absent"))?;

        tracing::info!(
            out_refund_no,
            out_trade_no = refund.get("out_trade_no").unwrap_or("-"),
            refund_status = refund.get("refund_status").unwrap_or("-"),
            "Refund notification accepted"
        );
        Ok(Ack::new())
    }
}
