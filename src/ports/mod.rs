//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! notification pipelines and the outside world. Adapters implement these ports.
//!
//! ## Gateway Ports
//!
//! - `PaymentGateway` - Authenticity check and XML envelope serialization
//! - `NotifyCipher` - Decryption of the encrypted refund section
//! - `XmlParser` - Flat XML to field mapping
//!
//! ## Business Ports
//!
//! - `RefundHandler` - Application logic invoked with a decrypted refund

mod notify_cipher;
mod payment_gateway;
mod refund_handler;
mod xml_parser;

pub use notify_cipher::NotifyCipher;
pub use payment_gateway::PaymentGateway;
pub use refund_handler::RefundHandler;
pub use xml_parser::XmlParser;
