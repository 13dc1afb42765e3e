//! CLI client for the Kinnren anonymous family chat relay.

pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::run_client;
