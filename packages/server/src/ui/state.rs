//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetAnonymousMessagesUseCase,
    GetConnectionStatsUseCase, RelayMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（OnConnect）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（OnDisconnect）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// RelayMessageUseCase（OnMessage）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// GetAnonymousMessagesUseCase（履歴取得）
    pub get_anonymous_messages_usecase: Arc<GetAnonymousMessagesUseCase>,
    /// GetConnectionStatsUseCase（接続数取得）
    pub get_connection_stats_usecase: Arc<GetConnectionStatsUseCase>,
    /// Capacity of each connection's outbound queue
    pub send_queue_capacity: usize,
}
