//! Utilities shared by the Kinnren relay server and CLI client.

pub mod logger;
pub mod time;
