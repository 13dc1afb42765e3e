//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs
//! - `http`: HTTP API request / response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
