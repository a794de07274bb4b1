//! Application layer - services that orchestrate ports.
//!
//! Sits between the HTTP pipelines and the gateway collaborators: it knows
//! the order of operations but none of the wire details.

pub mod notify;

pub use notify::{
    acknowledge_payment, AcknowledgeRefund, NotificationValidator, RefundDecoder,
    ResponseEnvelope,
};
