//! Identifier factories.

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId};

/// Generates fresh connection identifiers (UUID v4).
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::new(Uuid::new_v4())
    }
}

/// Strictly increasing message id source, starting at 1.
///
/// Not synchronized; callers that share one sequence serialize access
/// themselves (the relay does so under its dispatch lock).
#[derive(Debug, Default)]
pub struct MessageIdSequence {
    last: u64,
}

impl MessageIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> MessageId {
        self.last += 1;
        MessageId::new(self.last)
    }
}
