//! Acknowledgement payloads and the terminal outcome of a notification.

use super::errors::NotifyError;

/// Extra fields echoed in a `SUCCESS` acknowledgement, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    fields: Vec<(String, String)>,
}

impl Ack {
    /// Plain `SUCCESS` with no extra fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. A repeated name replaces the earlier value in place.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Ack
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Ack::new(), |ack, (name, value)| ack.with(name, value))
    }
}

/// What a business handler returns: `Ok` acknowledges, `Err` rejects.
pub type NotifyReply = Result<Ack, NotifyError>;

/// Result of one notification, consumed once by the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Ack),
    Failure(NotifyError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl From<NotifyReply> for Outcome {
    fn from(result: NotifyReply) -> Self {
        match result {
            Ok(ack) => Outcome::Success(ack),
            Err(err) => Outcome::Failure(err),
        }
    }
}
