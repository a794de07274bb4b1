//! AES-256-ECB cipher for the refund section.
//!
//! The gateway encrypts `req_info` with AES-256 in ECB mode, PKCS#7 padding,
//! and base64 transport encoding. ECB has no IV, so identical plaintext
//! blocks encrypt identically. The mode is fixed by the gateway and must be
//! kept for interoperability.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::domain::notification::{DecryptionError, DecryptionKey};
use crate::ports::NotifyCipher;

type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;
type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;

const BLOCK_SIZE: usize = 16;

/// `NotifyCipher` for AES-256-ECB/PKCS#7 over base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesEcbCipher;

impl AesEcbCipher {
    /// Encrypts `plaintext` the way the gateway does. Used to replay or
    /// fabricate notifications in tests and tooling.
    pub fn encode(&self, key: &DecryptionKey, plaintext: &str) -> Result<String, DecryptionError> {
        let encryptor =
            Aes256EcbEnc::new_from_slice(key.as_bytes()).map_err(|_| DecryptionError::InvalidKey)?;
        let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(STANDARD.encode(ciphertext))
    }
}

impl NotifyCipher for AesEcbCipher {
    fn decode(&self, key: &DecryptionKey, ciphertext: &str) -> Result<String, DecryptionError> {
        let compact: String = ciphertext
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if compact.is_empty() {
            return Err(DecryptionError::MissingField);
        }

        let bytes = STANDARD
            .decode(compact)
            .map_err(|_| DecryptionError::InvalidBase64)?;
        if bytes.len() % BLOCK_SIZE != 0 {
            return Err(DecryptionError::BadPadding);
        }

        let decryptor =
            Aes256EcbDec::new_from_slice(key.as_bytes()).map_err(|_| DecryptionError::InvalidKey)?;
        let plaintext = decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
            .map_err(|_| DecryptionError::BadPadding)?;

        String::from_utf8(plaintext).map_err(|_| DecryptionError::InvalidPlaintext)
    }
}
