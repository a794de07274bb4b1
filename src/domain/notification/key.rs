//! Refund decryption key.
//!
//! The key is the lowercase hex MD5 digest of the partner key, used as the
//! 32 raw bytes of an AES-256 key. The derivation is fixed by the gateway.

use std::fmt;

/// Length of the derived key in bytes.
pub const DECRYPTION_KEY_LEN: usize = 32;

/// AES-256 key derived from the merchant partner key.
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptionKey([u8; DECRYPTION_KEY_LEN]);

impl DecryptionKey {
    /// Derives the key. Deterministic for a given partner key.
    pub fn derive(partner_key: &str) -> Self {
        let digest = md5::compute(partner_key.as_bytes());
        let hex = format!("{:x}", digest);

        let mut bytes = [0u8; DECRYPTION_KEY_LEN];
        bytes.copy_from_slice(hex.as_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DECRYPTION_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecryptionKey([REDACTED])")
    }
}
