//! XML parser port.

use crate::domain::notification::{Fields, XmlError};

/// Port for parsing a flat XML document into a field mapping.
pub trait XmlParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Fields, XmlError>;
}
