//! UseCase: 匿名メッセージ履歴の取得

use std::sync::Arc;

use crate::domain::{FamilyId, MessageStore, StoredMessage};

use super::error::GetAnonymousMessagesError;

/// 履歴取得のユースケース
pub struct GetAnonymousMessagesUseCase {
    /// MessageStore（永続化の抽象化）
    message_store: Arc<dyn MessageStore>,
}

impl GetAnonymousMessagesUseCase {
    pub const DEFAULT_LIMIT: usize = 50;
    pub const MAX_LIMIT: usize = 200;

    pub fn new(message_store: Arc<dyn MessageStore>) -> Self {
        Self { message_store }
    }

    /// family の直近のメッセージを新しい順に取得
    ///
    /// `limit` 未指定時は 50 件、最大 200 件。
    pub async fn execute(
        &self,
        family_id: &FamilyId,
        limit: Option<usize>,
    ) -> Result<Vec<StoredMessage>, GetAnonymousMessagesError> {
        let limit = limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT);
        Ok(self.message_store.recent_messages(family_id, limit).await?)
    }
}
