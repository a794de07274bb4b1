//! RefundDecoder - decrypts and re-parses the refund section.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::MerchantConfig;
use crate::domain::notification::{
    DecryptionError, DecryptionKey, NotifyError, RefundResult, ValidatedMessage,
};
use crate::ports::{NotifyCipher, XmlParser};

/// Decodes the encrypted section of an authenticated refund notification.
///
/// The decryption key is derived from the partner key once, here, and
/// reused for every request.
pub struct RefundDecoder {
    key: DecryptionKey,
    cipher: Arc<dyn NotifyCipher>,
    parser: Arc<dyn XmlParser>,
}

impl RefundDecoder {
    pub fn new(
        merchant: &MerchantConfig,
        cipher: Arc<dyn NotifyCipher>,
        parser: Arc<dyn XmlParser>,
    ) -> Self {
        Self {
            key: DecryptionKey::derive(merchant.partner_key.expose_secret()),
            cipher,
            parser,
        }
    }

    pub fn key(&self) -> &DecryptionKey {
        &self.key
    }

    /// Decrypts and parses the refund section.
    ///
    /// # Errors
    ///
    /// - `Decryption` - section missing, or any cipher failure
    /// - `Parse` - plaintext is not a flat XML document
    pub fn decode(&self, message: &ValidatedMessage) -> Result<RefundResult, NotifyError> {
        let ciphertext = message
            .encrypted_info()
            .ok_or(DecryptionError::MissingField)?;

        let plaintext = self.cipher.decode(&self.key, ciphertext)?;
        let fields = self.parser.parse(&plaintext)?;

        Ok(RefundResult::decrypted(fields))
    }
}
