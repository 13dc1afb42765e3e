//! MessageStore trait 定義
//!
//! 中継したメッセージを永続化する外部コラボレーターのインターフェース。
//! リレー自体の正しさはこのストアの成否に依存しません。

use async_trait::async_trait;

use super::{ChatMessage, FamilyId, RepositoryError, StoredMessage};

/// Durable (or at least longer-lived) record of relayed messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを family の履歴に記録
    async fn record_message(
        &self,
        family_id: &FamilyId,
        message: &ChatMessage,
    ) -> Result<StoredMessage, RepositoryError>;

    /// family の直近のメッセージを新しい順に取得
    async fn recent_messages(
        &self,
        family_id: &FamilyId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, RepositoryError>;
}
