//! UseCase: メッセージ中継処理（OnMessage）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 検証、ID・タイムスタンプの付与、family 内ブロードキャスト、履歴への記録
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全員に 1 回ずつ配信されることを保証
//! - 空メッセージが配信されないことを保証
//! - ID が一意かつ配信順に増加することを保証
//! - 履歴ストアの失敗が配信に影響しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：配信と記録
//! - 異常系：空・空白のみのメッセージ
//! - エッジケース：ストア障害、並行送信

use std::sync::Arc;

use kinnren_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastReport, ChatMessage, FamilyId, MessageContent, MessageIdSequence, MessagePusher,
    MessageStore, Timestamp,
};

use super::error::RelayError;

/// Result of a successful relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// The message as it was broadcast
    pub message: ChatMessage,
    /// Which connections received it and which were evicted
    pub report: BroadcastReport,
}

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// MessagePusher（接続レジストリ・配信）
    message_pusher: Arc<dyn MessagePusher>,
    /// MessageStore（任意。失敗しても配信には影響しない）
    message_store: Option<Arc<dyn MessageStore>>,
    /// Clock（タイムスタンプ取得）
    clock: Arc<dyn Clock>,
    /// ディスパッチロック兼 ID 採番
    ///
    /// 採番からブロードキャスト完了まで保持し、全メッセージの順序を一つに決める。
    /// 履歴ストアへの記録はこのロックの外で行う。
    dispatch: Mutex<MessageIdSequence>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        message_store: Option<Arc<dyn MessageStore>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            message_pusher,
            message_store,
            clock,
            dispatch: Mutex::new(MessageIdSequence::new()),
        }
    }

    /// メッセージを検証し、family の全接続（送信者を含む）に配信する
    ///
    /// # Arguments
    ///
    /// * `family_id` - 送信者の family
    /// * `content` - 受信したメッセージ内容（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(RelayOutcome)` - 配信したメッセージと配信結果
    /// * `Err(RelayError::InvalidContent)` - 空または空白のみ（配信しない）
    pub async fn execute(
        &self,
        family_id: &FamilyId,
        content: String,
    ) -> Result<RelayOutcome, RelayError> {
        let content = MessageContent::new(content)?;

        let mut sequence = self.dispatch.lock().await;
        let message = ChatMessage::new(
            sequence.next_id(),
            content,
            Timestamp::new(self.clock.now_millis()),
        );

        let report = self.message_pusher.broadcast(family_id, &message).await;
        drop(sequence);
        let report = report?;

        // 履歴への記録はロックの外で行う（ストアが遅くても配信は止まらない）
        if let Some(store) = &self.message_store
            && let Err(e) = store.record_message(family_id, &message).await
        {
            tracing::warn!(
                "Failed to record message #{} for family '{}': {}",
                message.id,
                family_id,
                e
            );
        }

        tracing::info!(
            "Relayed message #{} to {} connection(s) in family '{}'",
            message.id,
            report.delivered.len(),
            family_id
        );

        Ok(RelayOutcome { message, report })
    }
}
