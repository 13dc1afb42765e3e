//! UseCase: 切断処理（OnDisconnect）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 接続がレジストリから削除されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続の削除
//! - エッジケース：既に削除された接続の切断（冪等、エラーにならない）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// MessagePusher（接続レジストリ）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 接続がまだ登録されていた場合は `true`。ブロードキャスト中に既に削除されていた
    /// 場合や 2 回目の呼び出しでは `false`。
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        self.message_pusher.unregister_client(connection_id).await
    }
}
