//! Infrastructure layer: wire DTOs and concrete implementations of the domain ports.

pub mod dto;
pub mod message_pusher;
pub mod repository;
