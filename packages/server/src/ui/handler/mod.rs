//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{debug_connections, get_anonymous_messages, health_check, post_anonymous_message};
pub use websocket::websocket_handler;
