//! Domain layer: value objects, entities and the ports the relay depends on.
//!
//! Infrastructure implements [`MessagePusher`] and [`MessageStore`]; use cases
//! only ever see these traits.

pub mod entity;
pub mod error;
pub mod factory;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, StoredMessage};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdSequence};
pub use pusher::{BroadcastReport, MessagePusher, PusherChannel};
pub use repository::MessageStore;
pub use value_object::{ConnectionId, FamilyId, MessageContent, MessageId, Timestamp};

#[cfg(test)]
pub use repository::MockMessageStore;
