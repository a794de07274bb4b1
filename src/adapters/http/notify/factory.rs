//! MiddlewareFactory - binds one merchant to reusable pipelines.

use std::sync::Arc;

use super::pipeline::PipelineCore;
use super::plain::PlainPipeline;
use super::refund::EncryptedPipeline;
use crate::adapters::wechat::{AesEcbCipher, QuickXmlParser, WechatPayment};
use crate::application::notify::{NotificationValidator, RefundDecoder, ResponseEnvelope};
use crate::config::{MerchantConfig, NotifyLimits};
use crate::ports::{NotifyCipher, PaymentGateway, RefundHandler, XmlParser};

/// Process-wide construction point for notification pipelines.
///
/// The merchant configuration is bound once. Every pipeline handed out
/// shares the same gateway, envelope and derived decryption key.
///
/// # Example
///
/// ```ignore
/// let factory = MiddlewareFactory::new(config.merchant, config.notify.limits());
///
/// let app = Router::new()
///     .route("/notify", plain_notify_route(factory.notify(), on_payment))
///     .route("/refund-notify", refund_notify_route(factory.refund_notify(on_refund)));
/// ```
pub struct MiddlewareFactory {
    merchant: Arc<MerchantConfig>,
    core: PipelineCore,
    decoder: Arc<RefundDecoder>,
}

impl MiddlewareFactory {
    /// Factory backed by the WeChat Pay adapters.
    pub fn new(merchant: MerchantConfig, limits: NotifyLimits) -> Self {
        let merchant = Arc::new(merchant);
        let gateway = Arc::new(WechatPayment::new(merchant.clone()));
        Self::with_collaborators(
            merchant,
            limits,
            gateway,
            Arc::new(AesEcbCipher),
            Arc::new(QuickXmlParser),
        )
    }

    /// Factory with explicit collaborators, for other gateways and tests.
    pub fn with_collaborators(
        merchant: Arc<MerchantConfig>,
        limits: NotifyLimits,
        gateway: Arc<dyn PaymentGateway>,
        cipher: Arc<dyn NotifyCipher>,
        parser: Arc<dyn XmlParser>,
    ) -> Self {
        let core = PipelineCore::new(
            NotificationValidator::new(gateway.clone()),
            ResponseEnvelope::new(gateway),
            limits,
        );
        let decoder = Arc::new(RefundDecoder::new(&merchant, cipher, parser));

        tracing::debug!(
            mch_id = %merchant.mch_id,
            max_body_bytes = limits.max_body_bytes,
            "Notification pipelines bound to merchant"
        );

        Self {
            merchant,
            core,
            decoder,
        }
    }

    pub fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    /// Plain (payment) pipeline; wrap a handler with `plain_notify_route`.
    pub fn notify(&self) -> PlainPipeline {
        PlainPipeline::new(self.core.clone())
    }

    /// Refund pipeline dispatching decrypted results to `handler`.
    pub fn refund_notify<H>(&self, handler: H) -> EncryptedPipeline
    where
        H: RefundHandler + 'static,
    {
        EncryptedPipeline::new(self.core.clone(), self.decoder.clone(), Arc::new(handler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_merchant;
    use crate::domain::notification::DecryptionKey;
    use secrecy::ExposeSecret;

    #[test]
    fn binds_merchant_once() {
        let factory = MiddlewareFactory::new(test_merchant(), NotifyLimits::default());
        assert_eq!(factory.merchant().mch_id, "10000100");
    }

    #[test]
    fn pipelines_share_one_decryption_key() {
        let factory = MiddlewareFactory::new(test_merchant(), NotifyLimits::default());
        let expected = DecryptionKey::derive(test_merchant().partner_key.expose_secret());

        assert_eq!(factory.decoder.key(), &expected);
        let _ = factory.notify();
        assert_eq!(factory.decoder.key(), &expected);
    }
}
