//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続中のクライアント（接続レジストリ）と、それぞれの送信キューを管理
//! - family 単位のブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は UI 層が生成した有界キューの sender を受け取り、`try_send` で配信します。
//! キューが満杯（遅いクライアント）またはクローズ済みの接続は、その場でレジストリから
//! 削除されます。sender が drop されると UI 層の pusher ループが終了し、ソケットが閉じます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{
        BroadcastReport, ChatMessage, ConnectionId, FamilyId, MessagePushError, MessagePusher,
        PusherChannel,
    },
    infrastructure::dto::websocket::OutboundMessage,
};

/// One registered connection
pub struct ConnectionEntry {
    /// Broadcast group this connection joined
    pub family_id: FamilyId,
    /// Bounded outbound queue drained into the socket
    pub sender: PusherChannel,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let clients = Arc::new(Mutex::new(HashMap::new()));
/// let pusher = WebSocketMessagePusher::new(clients.clone());
///
/// pusher.register_client(connection_id, family_id.clone(), tx).await;
/// pusher.broadcast(&family_id, &message).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続レジストリ
    ///
    /// Key: ConnectionId
    /// Value: ConnectionEntry
    clients: Arc<Mutex<HashMap<ConnectionId, ConnectionEntry>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, ConnectionEntry>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(
        &self,
        connection_id: ConnectionId,
        family_id: FamilyId,
        sender: PusherChannel,
    ) {
        let mut clients = self.clients.lock().await;
        tracing::debug!(
            "Connection '{}' registered to family '{}'",
            connection_id,
            family_id
        );
        clients.insert(connection_id, ConnectionEntry { family_id, sender });
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        let removed = clients.remove(connection_id).is_some();
        if removed {
            tracing::debug!("Connection '{}' unregistered", connection_id);
        } else {
            tracing::debug!(
                "Connection '{}' was not registered, nothing to unregister",
                connection_id
            );
        }
        removed
    }

    async fn broadcast(
        &self,
        family_id: &FamilyId,
        message: &ChatMessage,
    ) -> Result<BroadcastReport, MessagePushError> {
        let payload = serde_json::to_string(&OutboundMessage::from(message))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))?;

        let mut report = BroadcastReport::default();
        let mut clients = self.clients.lock().await;

        // 失敗した接続は同じパスで削除し、残りへの配信は継続する
        clients.retain(|connection_id, entry| {
            if &entry.family_id != family_id {
                return true;
            }
            match entry.sender.try_send(payload.clone()) {
                Ok(()) => {
                    report.delivered.push(*connection_id);
                    true
                }
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Send queue of connection '{}' is full, disconnecting slow client",
                        connection_id
                    );
                    report.evicted.push(*connection_id);
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!(
                        "Connection '{}' closed during broadcast, removing from registry",
                        connection_id
                    );
                    report.evicted.push(*connection_id);
                    false
                }
            }
        });

        tracing::debug!(
            "Broadcasted message #{} to {} connection(s) in family '{}' ({} evicted)",
            message.id,
            report.delivered.len(),
            family_id,
            report.evicted.len()
        );

        Ok(report)
    }

    async fn count_by_family(&self) -> HashMap<FamilyId, usize> {
        let clients = self.clients.lock().await;
        let mut counts = HashMap::new();
        for entry in clients.values() {
            *counts.entry(entry.family_id.clone()).or_insert(0) += 1;
        }
        counts
    }
}
