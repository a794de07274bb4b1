//! Notification error types.
//!
//! Every failure on the notification path ends up as a `FAIL` acknowledgement.
//! The gateway sees only [`NotifyError::kind`], so kinds are short, stable
//! identifiers rather than free text.
//!
//! # Kind Mapping
//!
//! | Error | `return_msg` |
//! |-------|--------------|
//! | NotImplemented | `NotImplemented` |
//! | Read(e) | `BadMessage` + read error name |
//! | Auth(e) | `BadMessage` + auth error name |
//! | Decryption | `DecryptionError` |
//! | Parse | `ParseError` |
//! | Timeout | `RequestTimeout` |
//! | Handler | kind chosen by the handler |

use std::borrow::Cow;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while ingesting the request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Declared or received body exceeds the configured ceiling.
    #[error("payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Received byte count differs from `Content-Length`.
    #[error("declared length {declared} does not match received {received}")]
    LengthMismatch { declared: u64, received: u64 },

    /// Transport failed before the body completed.
    #[error("request aborted: {0}")]
    RequestAborted(String),

    /// Body did not arrive within the read deadline.
    #[error("body not received within {0:?}")]
    RequestTimeout(Duration),

    /// `Content-Type` declares a charset we cannot decode.
    #[error("unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Body bytes are not valid in the declared charset.
    #[error("body is not valid {0}")]
    InvalidEncoding(&'static str),

    /// Body was empty.
    #[error("empty body")]
    EmptyBody,
}

impl ReadError {
    /// Stable name appended to the `BadMessage` prefix.
    pub fn name(&self) -> &'static str {
        match self {
            ReadError::PayloadTooLarge { .. } => "PayloadTooLarge",
            ReadError::LengthMismatch { .. } => "LengthMismatch",
            ReadError::RequestAborted(_) => "RequestAborted",
            ReadError::RequestTimeout(_) => "RequestTimeout",
            ReadError::UnsupportedCharset(_) => "UnsupportedCharset",
            ReadError::InvalidEncoding(_) => "InvalidEncoding",
            ReadError::EmptyBody => "EmptyBody",
        }
    }
}

/// Errors raised by the authenticity check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Payload could not be parsed into candidate fields.
    #[error("invalid xml: {0}")]
    InvalidXml(String),

    /// Signature missing or not matching the merchant secret.
    #[error("signature verification failed")]
    Unauthorized,

    /// `appid` does not belong to this merchant.
    #[error("appid does not match merchant")]
    InvalidAppId,

    /// `mch_id` does not belong to this merchant.
    #[error("mch_id does not match merchant")]
    InvalidMchId,

    /// `sub_mch_id` does not match the configured sub-merchant.
    #[error("sub_mch_id does not match merchant")]
    InvalidSubMchId,

    /// Gateway reported `return_code=FAIL`.
    #[error("gateway protocol failure: {0}")]
    ProtocolError(String),

    /// Gateway reported `result_code=FAIL`.
    #[error("gateway business failure: {0}")]
    BusinessError(String),
}

impl AuthError {
    /// Stable name appended to the `BadMessage` prefix.
    pub fn name(&self) -> &'static str {
        match self {
            AuthError::InvalidXml(_) => "InvalidXML",
            AuthError::Unauthorized => "Unauthorized",
            AuthError::InvalidAppId => "InvalidAppId",
            AuthError::InvalidMchId => "InvalidMchId",
            AuthError::InvalidSubMchId => "InvalidSubMchId",
            AuthError::ProtocolError(_) => "ProtocolError",
            AuthError::BusinessError(_) => "BusinessError",
        }
    }
}

/// Errors raised while decrypting the refund section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptionError {
    #[error("encrypted field missing or empty")]
    MissingField,

    #[error("ciphertext is not valid base64")]
    InvalidBase64,

    #[error("decryption key has invalid length")]
    InvalidKey,

    /// Wrong key, truncated ciphertext, or corrupted padding.
    #[error("ciphertext padding is invalid")]
    BadPadding,

    #[error("plaintext is not valid utf-8")]
    InvalidPlaintext,
}

/// Errors raised by the XML parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    #[error("malformed xml: {0}")]
    Malformed(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("nested element <{0}> is not supported")]
    Nested(String),
}

/// Errors raised while rendering an acknowledgement.
///
/// These are fatal: the gateway cannot be answered in-protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("invalid element name: {0:?}")]
    InvalidFieldName(String),

    #[error("xml serialization failed: {0}")]
    Serialize(String),
}

/// Terminal failure of one notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("method not implemented")]
    NotImplemented,

    #[error("bad message: {0}")]
    Read(#[from] ReadError),

    #[error("bad message: {0}")]
    Auth(#[from] AuthError),

    #[error("decryption failed: {0}")]
    Decryption(#[from] DecryptionError),

    #[error("refund payload unparsable: {0}")]
    Parse(#[from] XmlError),

    /// Whole-request deadline elapsed, usually in a slow handler.
    #[error("notification not processed within {0:?}")]
    Timeout(Duration),

    /// Raised by downstream business logic; `kind` is echoed to the gateway.
    #[error("handler failed ({kind}): {message}")]
    Handler { kind: String, message: String },
}

impl NotifyError {
    /// Error for business handlers. An empty kind becomes `HandlerError`.
    pub fn handler(kind: impl Into<String>, message: impl Into<String>) -> Self {
        let kind = kind.into();
        NotifyError::Handler {
            kind: if kind.trim().is_empty() {
                "HandlerError".to_string()
            } else {
                kind
            },
            message: message.into(),
        }
    }

    /// Identifier written to `return_msg`.
    pub fn kind(&self) -> Cow<'static, str> {
        match self {
            NotifyError::NotImplemented => Cow::Borrowed("NotImplemented"),
            NotifyError::Read(e) => Cow::Owned(format!("BadMessage{}", e.name())),
            NotifyError::Auth(e) => Cow::Owned(format!("BadMessage{}", e.name())),
            NotifyError::Decryption(_) => Cow::Borrowed("DecryptionError"),
            NotifyError::Parse(_) => Cow::Borrowed("ParseError"),
            NotifyError::Timeout(_) => Cow::Borrowed("RequestTimeout"),
            NotifyError::Handler { kind, .. } => Cow::Owned(kind.clone()),
        }
    }

    /// True when the failure came from the notification itself rather than
    /// from processing it.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, NotifyError::Handler { .. } | NotifyError::Timeout(_))
    }
}
