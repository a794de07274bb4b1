//! WeChat Pay (v2) adapters.
//!
//! Implements the gateway-facing ports:
//! - `WechatPayment` - `PaymentGateway` (signature check, XML envelope)
//! - `AesEcbCipher` - `NotifyCipher` for the refund `req_info` section
//! - `QuickXmlParser` - `XmlParser` for flat gateway documents
//!
//! # Security
//!
//! - Signatures are compared in constant time
//! - The partner key is held as `secrecy::Secret` and only exposed to sign
//! - Refund payloads use AES-256-ECB as mandated by the gateway; ECB has no
//!   IV and leaks equality of plaintext blocks

mod aes_ecb;
mod payment;
pub mod signer;
mod xml;

pub use aes_ecb::AesEcbCipher;
pub use payment::WechatPayment;
pub use signer::{sign, SignType};
pub use xml::{parse_flat, write_flat, QuickXmlParser, ROOT_ELEMENT};
