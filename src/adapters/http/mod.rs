//! HTTP adapters - axum pipelines for inbound gateway callbacks.

pub mod notify;

pub use notify::{notify_router, MiddlewareFactory};
