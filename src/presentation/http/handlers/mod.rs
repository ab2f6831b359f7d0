//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod category;
pub mod channel;
pub mod health;
pub mod server;
