//! UseCase: family ごとの接続数取得

use std::{collections::HashMap, sync::Arc};

use crate::domain::{FamilyId, MessagePusher};

/// 接続数取得のユースケース
pub struct GetConnectionStatsUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetConnectionStatsUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(&self) -> HashMap<FamilyId, usize> {
        self.message_pusher.count_by_family().await
    }
}
