//! Bounded request-body ingestion.
//!
//! The gateway posts small XML documents. Anything larger than the configured
//! ceiling, slower than the read deadline, or in an encoding we cannot decode
//! is refused before it reaches the validator.

use axum::body::Body;
use axum::http::{header, HeaderMap};
use futures::StreamExt;

use crate::config::NotifyLimits;
use crate::domain::notification::{RawNotification, ReadError};

/// Character encodings accepted on the notification endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    UsAscii,
}

impl Charset {
    /// Reads the `charset` parameter of `Content-Type`, defaulting to UTF-8.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ReadError> {
        let mime = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<mime::Mime>().ok());

        let Some(charset) = mime.as_ref().and_then(|m| m.get_param(mime::CHARSET)) else {
            return Ok(Charset::Utf8);
        };

        match charset.as_str().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "us-ascii" | "ascii" => Ok(Charset::UsAscii),
            other => Err(ReadError::UnsupportedCharset(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::UsAscii => "us-ascii",
        }
    }

    fn decode(&self, bytes: Vec<u8>) -> Result<String, ReadError> {
        if *self == Charset::UsAscii && !bytes.is_ascii() {
            return Err(ReadError::InvalidEncoding(self.name()));
        }
        String::from_utf8(bytes).map_err(|_| ReadError::InvalidEncoding(self.name()))
    }
}

/// Reads the whole body into a [`RawNotification`].
///
/// # Errors
///
/// - `PayloadTooLarge` - declared or received length above `max_body_bytes`
/// - `RequestTimeout` - body not complete within `read_timeout`
/// - `RequestAborted` - transport error mid-body
/// - `LengthMismatch` - received length differs from `Content-Length`
/// - `UnsupportedCharset` / `InvalidEncoding` - body cannot be decoded
/// - `EmptyBody` - nothing but whitespace
pub async fn read_notification(
    headers: &HeaderMap,
    body: Body,
    limits: &NotifyLimits,
) -> Result<RawNotification, ReadError> {
    let charset = Charset::from_headers(headers)?;
    let declared = declared_length(headers);

    if let Some(declared) = declared {
        if declared > limits.max_body_bytes as u64 {
            return Err(ReadError::PayloadTooLarge {
                limit: limits.max_body_bytes,
            });
        }
    }

    let bytes = tokio::time::timeout(
        limits.read_timeout,
        collect_bounded(body, limits.max_body_bytes),
    )
    .await
    .map_err(|_| ReadError::RequestTimeout(limits.read_timeout))??;

    if let Some(declared) = declared {
        let received = bytes.len() as u64;
        if declared != received {
            return Err(ReadError::LengthMismatch { declared, received });
        }
    }

    RawNotification::new(charset.decode(bytes)?)
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

async fn collect_bounded(body: Body, limit: usize) -> Result<Vec<u8>, ReadError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ReadError::RequestAborted(e.to_string()))?;
        if buf.len() + chunk.len() > limit {
            return Err(ReadError::PayloadTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf)
}
