//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetAnonymousMessagesUseCase,
    GetConnectionStatsUseCase, RelayMessageUseCase,
};

use super::{
    handler::{
        debug_connections, get_anonymous_messages, health_check, post_anonymous_message,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Anonymous family chat relay server
///
/// # Example
///
/// ```ignore
/// let server = kinnren_server::build_server(&RelayConfig::default());
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（接続のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    relay_message_usecase: Arc<RelayMessageUseCase>,
    /// GetAnonymousMessagesUseCase（履歴取得のユースケース）
    get_anonymous_messages_usecase: Arc<GetAnonymousMessagesUseCase>,
    /// GetConnectionStatsUseCase（接続数取得のユースケース）
    get_connection_stats_usecase: Arc<GetConnectionStatsUseCase>,
    /// Capacity of each connection's outbound queue
    send_queue_capacity: usize,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        get_anonymous_messages_usecase: Arc<GetAnonymousMessagesUseCase>,
        get_connection_stats_usecase: Arc<GetConnectionStatsUseCase>,
        send_queue_capacity: usize,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            relay_message_usecase,
            get_anonymous_messages_usecase,
            get_connection_stats_usecase,
            send_queue_capacity,
        }
    }

    /// Build the axum router without binding a socket
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            relay_message_usecase: self.relay_message_usecase,
            get_anonymous_messages_usecase: self.get_anonymous_messages_usecase,
            get_connection_stats_usecase: self.get_connection_stats_usecase,
            send_queue_capacity: self.send_queue_capacity.max(1),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route(
                "/api/anonymous-messages",
                get(get_anonymous_messages).post(post_anonymous_message),
            )
            .route("/debug/connections", get(debug_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Kinnren relay server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws?family_id=<family>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
