//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Type tag carried by every outbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "anonymous_message")]
    AnonymousMessage,
}

/// Client → relay frame. Fields other than `content` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub content: String,
}

/// Relay → client frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub id: u64,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub r#type: MessageType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_message_ignores_extra_fields() {
        // テスト項目: content 以外のフィールドは無視される
        // given (前提条件):
        let raw = r#"{"content":"hello","author":"mom","type":"whatever"}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn test_inbound_message_requires_string_content() {
        // テスト項目: content が欠落している、または文字列でない場合はパースに失敗する
        // when (操作) / then (期待する結果):
        assert!(serde_json::from_str::<InboundMessage>(r#"{"text":"hi"}"#).is_err());
        assert!(serde_json::from_str::<InboundMessage>(r#"{"content":42}"#).is_err());
        assert!(serde_json::from_str::<InboundMessage>("hello").is_err());
    }

    #[test]
    fn test_outbound_message_wire_format() {
        // テスト項目: 送信フレームが仕様どおりの JSON 形式になる
        // given (前提条件):
        let msg = OutboundMessage {
            id: 7,
            content: "hello".to_string(),
            created_at: "2023-01-01T00:00:00.000Z".to_string(),
            r#type: MessageType::AnonymousMessage,
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"id":7,"content":"hello","createdAt":"2023-01-01T00:00:00.000Z","type":"anonymous_message"}"#
        );
    }
}
