//! Paygate Notify - verification middleware for payment-gateway callbacks
//!
//! Accepts the gateway's asynchronous payment and refund notifications,
//! verifies them against the merchant secret, decrypts refund payloads, hands
//! the result to application code and answers every request with a
//! well-formed XML acknowledgement.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
