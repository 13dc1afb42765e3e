//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのメッセージ配信（接続レジストリ）のインターフェース。
//! 具体的な実装は Infrastructure 層が提供します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatMessage, ConnectionId, FamilyId, MessagePushError};

/// Outbound queue feeding one client's socket.
pub type PusherChannel = mpsc::Sender<String>;

/// Result of one broadcast pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the message was enqueued for
    pub delivered: Vec<ConnectionId>,
    /// Connections removed because their queue was full or closed
    pub evicted: Vec<ConnectionId>,
}

/// Connection registry plus fan-out.
///
/// A connection is registered exactly while its socket is open.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(
        &self,
        connection_id: ConnectionId,
        family_id: FamilyId,
        sender: PusherChannel,
    );

    /// 接続を登録解除。登録されていなかった場合は `false`（冪等）
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// family に属する全ての接続（送信者を含む）にメッセージを配信
    ///
    /// 送信に失敗した接続はレジストリから削除され、配信は継続される。
    async fn broadcast(
        &self,
        family_id: &FamilyId,
        message: &ChatMessage,
    ) -> Result<BroadcastReport, MessagePushError>;

    /// family ごとの接続数を取得
    async fn count_by_family(&self) -> HashMap<FamilyId, usize>;
}
