//! WeChat Pay (v2) implementation of the `PaymentGateway` port.

use std::sync::Arc;

use secrecy::ExposeSecret;

use super::signer;
use super::xml::{parse_flat, write_flat, ROOT_ELEMENT};
use crate::config::MerchantConfig;
use crate::domain::notification::{AuthError, EnvelopeError, Fields};
use crate::ports::PaymentGateway;

const FAIL: &str = "FAIL";

/// Gateway adapter bound to one merchant.
pub struct WechatPayment {
    merchant: Arc<MerchantConfig>,
}

impl WechatPayment {
    pub fn new(merchant: Arc<MerchantConfig>) -> Self {
        Self { merchant }
    }

    fn check_merchant(&self, fields: &Fields) -> Result<(), AuthError> {
        if field(fields, "appid") != Some(self.merchant.app_id.as_str()) {
            return Err(AuthError::InvalidAppId);
        }
        if field(fields, "mch_id") != Some(self.merchant.mch_id.as_str()) {
            return Err(AuthError::InvalidMchId);
        }
        if let Some(sub_mch_id) = &self.merchant.sub_mch_id {
            if field(fields, "sub_mch_id") != Some(sub_mch_id.as_str()) {
                return Err(AuthError::InvalidSubMchId);
            }
        }
        Ok(())
    }
}

impl PaymentGateway for WechatPayment {
    /// Checks, in order: XML shape, `return_code`, `result_code`, merchant
    /// identity, then the signature.
    fn validate(&self, raw: &str) -> Result<Fields, AuthError> {
        let fields = parse_flat(raw).map_err(|e| AuthError::InvalidXml(e.to_string()))?;

        if field(&fields, "return_code") == Some(FAIL) {
            let msg = field(&fields, "return_msg").unwrap_or_default();
            return Err(AuthError::ProtocolError(msg.to_string()));
        }
        if field(&fields, "result_code") == Some(FAIL) {
            let code = field(&fields, "err_code").unwrap_or_default();
            return Err(AuthError::BusinessError(code.to_string()));
        }

        self.check_merchant(&fields)?;
        signer::verify(&fields, self.merchant.partner_key.expose_secret())?;

        Ok(fields)
    }

    fn build_xml(&self, fields: &[(String, String)]) -> Result<String, EnvelopeError> {
        write_flat(ROOT_ELEMENT, fields)
    }
}

fn field<'a>(fields: &'a Fields, name: &str) -> Option<&'a str> {
    fields.get(name).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::wechat::signer::{sign, SignType, SIGN_FIELD};
    use crate::config::test_merchant;

    fn gateway() -> WechatPayment {
        WechatPayment::new(Arc::new(test_merchant()))
    }

    fn signed_xml(pairs: &[(&str, &str)]) -> String {
        let merchant = test_merchant();
        let mut fields: Fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let signature = sign(&fields, merchant.partner_key.expose_secret(), SignType::Md5).unwrap();
        fields.insert(SIGN_FIELD.to_string(), signature);
        let ordered: Vec<_> = fields.into_iter().collect();
        write_flat(ROOT_ELEMENT, &ordered).unwrap()
    }

    fn paid(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        let mut pairs = vec![
            ("return_code", "SUCCESS"),
            ("result_code", "SUCCESS"),
            ("appid", "wx2421b1c4370ec43b"),
            ("mch_id", "10000100"),
            ("out_trade_no", "1409811653"),
            ("total_fee", "1"),
        ];
        pairs.extend_from_slice(extra);
        pairs
    }

    #[test]
    fn validates_signed_notification() {
        let fields = gateway().validate(&signed_xml(&paid(&[]))).unwrap();
        assert_eq!(fields.get("out_trade_no").unwrap(), "1409811653");
    }

    #[test]
    fn rejects_unparsable_payload() {
        let result = gateway().validate("<xml><a>");
        assert!(matches!(result, Err(AuthError::InvalidXml(_))));
    }

    #[test]
    fn rejects_unsigned_payload() {
        let xml = write_flat(
            ROOT_ELEMENT,
            &paid(&[])
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        assert_eq!(gateway().validate(&xml), Err(AuthError::Unauthorized));
    }

    #[test]
    fn rejects_tampered_signature() {
        let xml = signed_xml(&paid(&[])).replace("<total_fee>1<", "<total_fee>100<");
        assert_eq!(gateway().validate(&xml), Err(AuthError::Unauthorized));
    }

    #[test]
    fn rejects_protocol_failure() {
        let xml = signed_xml(&[("return_code", "FAIL"), ("return_msg", "SIGNERROR")]);
        assert_eq!(
            gateway().validate(&xml),
            Err(AuthError::ProtocolError("SIGNERROR".to_string()))
        );
    }

    #[test]
    fn rejects_business_failure() {
        let mut pairs = paid(&[("err_code", "ORDERPAID")]);
        pairs[1] = ("result_code", "FAIL");
        assert_eq!(
            gateway().validate(&signed_xml(&pairs)),
            Err(AuthError::BusinessError("ORDERPAID".to_string()))
        );
    }

    #[test]
    fn rejects_foreign_appid() {
        let mut pairs = paid(&[]);
        pairs[2] = ("appid", "wx_someone_else");
        assert_eq!(
            gateway().validate(&signed_xml(&pairs)),
            Err(AuthError::InvalidAppId)
        );
    }

    #[test]
    fn rejects_foreign_mch_id() {
        let mut pairs = paid(&[]);
        pairs[3] = ("mch_id", "999");
        assert_eq!(
            gateway().validate(&signed_xml(&pairs)),
            Err(AuthError::InvalidMchId)
        );
    }

    #[test]
    fn checks_sub_mch_id_when_configured() {
        let mut merchant = test_merchant();
        merchant.sub_mch_id = Some("1900000109".to_string());
        let gateway = WechatPayment::new(Arc::new(merchant));

        assert_eq!(
            gateway.validate(&signed_xml(&paid(&[]))),
            Err(AuthError::InvalidSubMchId)
        );
        assert!(gateway
            .validate(&signed_xml(&paid(&[("sub_mch_id", "1900000109")])))
            .is_ok());
    }

    #[test]
    fn build_xml_keeps_field_order() {
        let xml = gateway()
            .build_xml(&[
                ("return_code".to_string(), "SUCCESS".to_string()),
                ("out_trade_no".to_string(), "X".to_string()),
            ])
            .unwrap();
        assert_eq!(
            xml,
            "<xml><return_code>SUCCESS</return_code><out_trade_no>X</out_trade_no></xml>"
        );
    }
}
