//! Relay configuration and dependency wiring.

use std::{collections::HashMap, sync::Arc};

use kinnren_shared::time::SystemClock;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePusher, MessageStore},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryMessageStore},
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetAnonymousMessagesUseCase,
        GetConnectionStatsUseCase, RelayMessageUseCase,
    },
};

/// Tunables of one relay instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Outbound frames buffered per connection before it is dropped as too slow
    pub send_queue_capacity: usize,
    /// Messages kept per family by the in-memory store
    pub history_capacity: usize,
}

impl RelayConfig {
    pub const DEFAULT_SEND_QUEUE_CAPACITY: usize = 64;
    pub const DEFAULT_HISTORY_CAPACITY: usize = 500;
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            send_queue_capacity: Self::DEFAULT_SEND_QUEUE_CAPACITY,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Wire repository, pusher and use cases into a [`Server`].
///
/// Each call builds a fresh, independent connection registry.
pub fn build_server(config: &RelayConfig) -> Server {
    // 1. MessageStore (in-memory history)
    let message_store: Arc<dyn MessageStore> =
        Arc::new(InMemoryMessageStore::new(config.history_capacity));

    // 2. MessagePusher (connection registry)
    let clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new(clients));

    // 3. UseCases
    let connect_participant_usecase =
        Arc::new(ConnectParticipantUseCase::new(message_pusher.clone()));
    let disconnect_participant_usecase =
        Arc::new(DisconnectParticipantUseCase::new(message_pusher.clone()));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        message_pusher.clone(),
        Some(message_store.clone()),
        Arc::new(SystemClock),
    ));
    let get_anonymous_messages_usecase =
        Arc::new(GetAnonymousMessagesUseCase::new(message_store));
    let get_connection_stats_usecase = Arc::new(GetConnectionStatsUseCase::new(message_pusher));

    // 4. Server
    Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        relay_message_usecase,
        get_anonymous_messages_usecase,
        get_connection_stats_usecase,
        config.send_queue_capacity,
    )
}
