//! API module for the realtime relay
//!
//! HTTP server setup plus the WebSocket broadcast endpoint.

pub mod http;
pub mod websocket;

pub use http::{create_router, serve, serve_with_shutdown};
