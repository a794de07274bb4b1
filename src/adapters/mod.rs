//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum pipelines for the notification endpoints
//! - `wechat` - WeChat Pay v2 signature, XML and cipher adapters

pub mod http;
pub mod wechat;
