//! Anonymous family chat relay.
//!
//! Accepts WebSocket connections on `/ws`, stamps every valid inbound chat
//! payload with a server id and timestamp, and fans it out to every open
//! connection of the sender's family, the sender included.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

mod config;

pub use config::{RelayConfig, build_server};
