//! UseCase: 接続処理（OnConnect）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 新しい接続が ConnectionId を割り当てられ、レジストリに登録されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - 複数接続：同じ family に複数の接続（匿名のため重複チェックはない）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, FamilyId, MessagePusher, PusherChannel};

/// 接続のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（接続レジストリ）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録する。失敗しない。
    ///
    /// # Arguments
    ///
    /// * `family_id` - 接続が参加する family
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 割り当てられた ConnectionId
    pub async fn execute(&self, family_id: FamilyId, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate();
        self.message_pusher
            .register_client(connection_id, family_id, sender)
            .await;
        connection_id
    }
}
