//! Notification domain - payload shapes, outcomes, and the error taxonomy.

mod errors;
mod key;
mod message;
mod outcome;

pub use errors::{AuthError, DecryptionError, EnvelopeError, NotifyError, ReadError, XmlError};
pub use key::{DecryptionKey, DECRYPTION_KEY_LEN};
pub use message::{
    Fields, RawNotification, RefundResult, ValidatedMessage, ENCRYPTED_INFO_FIELD, REQ_INFO_FIELD,
};
pub use outcome::{Ack, NotifyReply, Outcome};
