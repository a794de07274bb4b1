//! Symmetric cipher port for encrypted notification sections.

use crate::domain::notification::{DecryptionError, DecryptionKey};

/// Port for decrypting the refund section of a notification.
pub trait NotifyCipher: Send + Sync {
    /// Decrypts `ciphertext` (as transmitted) into plaintext.
    fn decode(&self, key: &DecryptionKey, ciphertext: &str) -> Result<String, DecryptionError>;
}
