//! Domain layer containing notification types and the error taxonomy.
//!
//! # Module Organization
//!
//! - `notification` - Payloads at each trust level, acknowledgements, errors, derived key

pub mod notification;
