//! InMemory MessageStore 実装
//!
//! family ごとにリングバッファでメッセージを ID 順に保持します。容量を超えると
//! ID の最も古いメッセージから破棄されます。プロセスを再起動すると履歴は失われます。

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, FamilyId, MessageStore, RepositoryError, StoredMessage};

/// インメモリ MessageStore 実装
pub struct InMemoryMessageStore {
    /// family ごとの最大保持件数
    capacity_per_family: usize,
    /// family ごとのメッセージ（古い順）
    messages: Mutex<HashMap<FamilyId, VecDeque<StoredMessage>>>,
}

impl InMemoryMessageStore {
    /// 新しい InMemoryMessageStore を作成
    pub fn new(capacity_per_family: usize) -> Self {
        Self {
            capacity_per_family,
            messages: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn record_message(
        &self,
        family_id: &FamilyId,
        message: &ChatMessage,
    ) -> Result<StoredMessage, RepositoryError> {
        let stored = StoredMessage::new(family_id.clone(), message.clone());
        if self.capacity_per_family == 0 {
            return Ok(stored);
        }

        let mut messages = self.messages.lock().await;
        let history = messages.entry(family_id.clone()).or_default();
        // 記録は配信ロックの外で行われるため、到着順ではなく ID 順に挿入する
        let position = history
            .iter()
            .rposition(|m| m.message.id < message.id)
            .map_or(0, |i| i + 1);
        history.insert(position, stored.clone());
        while history.len() > self.capacity_per_family {
            history.pop_front();
        }

        Ok(stored)
    }

    async fn recent_messages(
        &self,
        family_id: &FamilyId,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .get(family_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
