//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, ConnectionId, FamilyId},
    infrastructure::dto::websocket::InboundMessage,
    ui::state::AppState,
    usecase::RelayError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub family_id: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let family_id = match query.family_id {
        None => FamilyId::default(),
        Some(raw) => match FamilyId::try_from(raw) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Rejecting WebSocket upgrade: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, family_id)))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket sender.
///
/// The loop ends when the socket write fails or when the registry drops the queue's
/// sender (disconnect or eviction of a slow client); in the latter case the socket is
/// closed politely.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, family_id: FamilyId) {
    let (sender, mut receiver) = socket.split();

    // OnConnect
    let (tx, rx) = mpsc::channel(state.send_queue_capacity);
    let connection_id = state
        .connect_participant_usecase
        .execute(family_id.clone(), tx)
        .await;
    tracing::info!(
        "Connection '{}' opened in family '{}'",
        connection_id,
        family_id
    );

    let mut send_task = pusher_loop(rx, sender);

    // OnMessage
    let state_clone = state.clone();
    let family_id_clone = family_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text_frame(
                        &state_clone,
                        &connection_id,
                        &family_id_clone,
                        text.as_str(),
                    )
                    .await;
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // OnDisconnect
    if state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        tracing::info!("Connection '{}' closed and removed from registry", connection_id);
    } else {
        tracing::info!(
            "Connection '{}' closed (already removed from registry)",
            connection_id
        );
    }
}

/// Parse one inbound text frame and relay it.
///
/// Malformed or empty payloads are logged and dropped; nothing is sent back to the
/// sender. Returns the relayed message, if any.
pub(crate) async fn handle_text_frame(
    state: &AppState,
    connection_id: &ConnectionId,
    family_id: &FamilyId,
    text: &str,
) -> Option<ChatMessage> {
    let inbound = match serde_json::from_str::<InboundMessage>(text) {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!(
                "Discarding malformed payload from '{}': {}",
                connection_id,
                e
            );
            return None;
        }
    };

    match state
        .relay_message_usecase
        .execute(family_id, inbound.content)
        .await
    {
        Ok(outcome) => Some(outcome.message),
        Err(RelayError::InvalidContent(e)) => {
            tracing::warn!("Discarding payload from '{}': {}", connection_id, e);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to relay payload from '{}': {}", connection_id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePusher, MessageStore},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryMessageStore,
        },
        usecase::{
            ConnectParticipantUseCase, DisconnectParticipantUseCase, GetAnonymousMessagesUseCase,
            GetConnectionStatsUseCase, RelayMessageUseCase,
        },
    };
    use kinnren_shared::time::SystemClock;
    use std::collections::{HashMap, HashSet};
    use tokio::sync::Mutex;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 受信フレームの処理（パース → 検証 → 中継）と接続・切断のライフサイクル
    //
    // 【どのようなシナリオをテストするか】
    // 1. A, B, C が接続し、A の "hello" が 3 人全員に 1 回ずつ届く
    // 2. 空白のみ・content 欠落・不正 JSON は誰にも配信されない
    // 3. C が切断した後の "bye" は A, B にのみ届く
    // 4. 配信中に送信に失敗した接続は削除され、以降は何も受信しない
    // 5. 送信順序が全ての接続で保たれる
    // ========================================

    fn create_test_state(send_queue_capacity: usize) -> AppState {
        let pusher: Arc<dyn MessagePusher> =
            Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new()))));
        let store: Arc<dyn MessageStore> = Arc::new(InMemoryMessageStore::new(100));
        AppState {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(pusher.clone())),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                pusher.clone(),
            )),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(
                pusher.clone(),
                Some(store.clone()),
                Arc::new(SystemClock),
            )),
            get_anonymous_messages_usecase: Arc::new(GetAnonymousMessagesUseCase::new(store)),
            get_connection_stats_usecase: Arc::new(GetConnectionStatsUseCase::new(pusher)),
            send_queue_capacity,
        }
    }

    async fn connect(state: &AppState) -> (ConnectionId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(state.send_queue_capacity);
        let id = state
            .connect_participant_usecase
            .execute(FamilyId::default(), tx)
            .await;
        (id, rx)
    }

    fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<serde_json::Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }

    #[tokio::test]
    async fn test_example_scenario() {
        // テスト項目: A, B, C の接続・送信・切断の一連のシナリオ
        // given (前提条件):
        let state = create_test_state(16);
        let family = FamilyId::default();
        let (a, mut rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;
        let (c, mut rx_c) = connect(&state).await;

        // when (操作): A が "hello" を送信
        let hello = handle_text_frame(&state, &a, &family, r#"{"content": "hello"}"#).await;

        // then (期待する結果): 3 人全員が 1 回ずつ受信
        let hello = hello.unwrap();
        for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0]["content"], "hello");
            assert_eq!(frames[0]["type"], "anonymous_message");
            assert_eq!(frames[0]["id"], hello.id.value());
            assert!(frames[0]["createdAt"].as_str().unwrap().ends_with('Z'));
        }

        // when (操作): B が空白のみを送信
        let blank = handle_text_frame(&state, &b, &family, r#"{"content": "  "}"#).await;

        // then (期待する結果): 誰にも配信されない
        assert!(blank.is_none());
        assert!(drain(&mut rx_a).is_empty());
        assert!(drain(&mut rx_b).is_empty());
        assert!(drain(&mut rx_c).is_empty());

        // when (操作): C が切断し、A が "bye" を送信
        assert!(state.disconnect_participant_usecase.execute(&c).await);
        handle_text_frame(&state, &a, &family, r#"{"content": "bye"}"#).await;

        // then (期待する結果): A と B のみが受信
        assert_eq!(drain(&mut rx_a).len(), 1);
        assert_eq!(drain(&mut rx_b).len(), 1);
        assert!(drain(&mut rx_c).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payloads_are_not_broadcast() {
        // テスト項目: 空文字・空白のみ・content 欠落・不正 JSON は配信されない
        // given (前提条件):
        let state = create_test_state(16);
        let family = FamilyId::default();
        let (a, mut rx_a) = connect(&state).await;

        // when (操作):
        let payloads = [
            r#"{"content": ""}"#,
            r#"{"content": "   "}"#,
            r#"{"message": "hi"}"#,
            r#"{"content": null}"#,
            "not json at all",
            "",
        ];
        let mut relayed = 0;
        for payload in payloads {
            if handle_text_frame(&state, &a, &family, payload).await.is_some() {
                relayed += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(relayed, 0);
        assert!(drain(&mut rx_a).is_empty());
    }

    #[tokio::test]
    async fn test_failed_recipient_is_removed_and_others_still_receive() {
        // テスト項目: 配信中に送信に失敗した接続は削除され、他の接続には届く
        // given (前提条件):
        let state = create_test_state(16);
        let family = FamilyId::default();
        let (a, mut rx_a) = connect(&state).await;
        let (_b, rx_b) = connect(&state).await;
        drop(rx_b); // B のソケットが突然閉じた

        // when (操作):
        handle_text_frame(&state, &a, &family, r#"{"content": "first"}"#).await;
        handle_text_frame(&state, &a, &family, r#"{"content": "second"}"#).await;

        // then (期待する結果):
        assert_eq!(drain(&mut rx_a).len(), 2);
        let counts = state.get_connection_stats_usecase.execute().await;
        assert_eq!(counts.get(&family), Some(&1));
    }

    #[tokio::test]
    async fn test_order_is_preserved_for_every_client() {
        // テスト項目: 異なる送信者からの M1, M2 が全ての接続で同じ順序で届く
        // given (前提条件):
        let state = create_test_state(64);
        let family = FamilyId::default();
        let (a, mut rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;

        // when (操作):
        for i in 0..10 {
            let sender = if i % 2 == 0 { &a } else { &b };
            let payload = format!(r#"{{"content": "m{}"}}"#, i);
            handle_text_frame(&state, sender, &family, &payload).await;
        }

        // then (期待する結果):
        let expected: Vec<String> = (0..10).map(|i| format!("m{}", i)).collect();
        for rx in [&mut rx_a, &mut rx_b] {
            let contents: Vec<String> = drain(rx)
                .iter()
                .map(|f| f["content"].as_str().unwrap().to_string())
                .collect();
            assert_eq!(contents, expected);
        }
    }

    #[tokio::test]
    async fn test_identifiers_are_unique() {
        // テスト項目: 配信された K 件のメッセージ ID が全て異なる
        // given (前提条件):
        let state = create_test_state(128);
        let family = FamilyId::default();
        let (a, _rx_a) = connect(&state).await;

        // when (操作):
        let mut ids = HashSet::new();
        for i in 0..100 {
            let payload = format!(r#"{{"content": "message {}"}}"#, i);
            let message = handle_text_frame(&state, &a, &family, &payload)
                .await
                .unwrap();
            ids.insert(message.id);
        }

        // then (期待する結果):
        assert_eq!(ids.len(), 100);
    }

    /// warn 以上のログを取り込むライター
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Ok(mut logs) = self.0.lock() {
                logs.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            let logs = self.0.lock().map(|l| l.clone()).unwrap_or_default();
            String::from_utf8_lossy(&logs)
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[tokio::test]
    async fn test_empty_content_is_discarded_at_warn_like_malformed_json() {
        // テスト項目: 空白のみの content は不正 JSON と同じく warn レベルで記録されて破棄される
        // given (前提条件):
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let state = create_test_state(16);
        let family = FamilyId::default();
        let (a, mut rx_a) = connect(&state).await;

        // when (操作):
        let blank = handle_text_frame(&state, &a, &family, r#"{"content": "   "}"#).await;
        let malformed = handle_text_frame(&state, &a, &family, "not json").await;

        // then (期待する結果):
        assert!(blank.is_none());
        assert!(malformed.is_none());
        assert!(drain(&mut rx_a).is_empty());
        let lines = logs.lines();
        let discarded: Vec<&String> = lines
            .iter()
            .filter(|l| l.contains("Discarding") && l.contains(&a.to_string()))
            .collect();
        assert_eq!(discarded.len(), 2, "captured logs: {:?}", lines);
        assert!(discarded.iter().all(|l| l.contains("WARN")));
    }
}
