//! Value objects for the relay domain.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Opaque identifier of one open client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ValueObjectError::InvalidConnectionId(value.to_string()))
    }
}

/// Broadcast group key. Connections only receive messages relayed within
/// their own family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FamilyId(String);

impl FamilyId {
    pub const MAX_LEN: usize = 64;
    pub const DEFAULT: &'static str = "default";

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyFamilyId);
        }
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::FamilyIdTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValueObjectError::InvalidFamilyId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for FamilyId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for FamilyId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-assigned message identifier, strictly increasing per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chat message text. Never empty or whitespace-only; otherwise kept
/// exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyContent);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_content_rejects_empty() {
        // テスト項目: 空文字列のメッセージ内容は拒否される
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyContent));
    }

    #[test]
    fn test_message_content_rejects_whitespace_only() {
        // テスト項目: 空白のみのメッセージ内容は拒否される
        // given (前提条件):
        let value = "  \t\n ".to_string();

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyContent));
    }

    #[test]
    fn test_message_content_keeps_surrounding_whitespace() {
        // テスト項目: 有効なメッセージ内容は送信されたまま保持される（トリムしない）
        // given (前提条件):
        let value = "  hello  ".to_string();

        // when (操作):
        let content = MessageContent::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(content.as_str(), "  hello  ");
    }

    #[test]
    fn test_family_id_accepts_slug() {
        // テスト項目: 英数字・ハイフン・アンダースコアの family id は受け付けられる
        // given (前提条件):
        let value = "family-1_Tanaka".to_string();

        // when (操作):
        let result = FamilyId::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "family-1_Tanaka");
    }

    #[test]
    fn test_family_id_rejects_invalid_values() {
        // テスト項目: 空・長すぎる・不正文字を含む family id は拒否される
        // given (前提条件):
        let too_long = "a".repeat(FamilyId::MAX_LEN + 1);

        // when (操作) / then (期待する結果):
        assert_eq!(
            FamilyId::new(String::new()),
            Err(ValueObjectError::EmptyFamilyId)
        );
        assert_eq!(
            FamilyId::new(too_long),
            Err(ValueObjectError::FamilyIdTooLong {
                max: FamilyId::MAX_LEN,
                actual: FamilyId::MAX_LEN + 1,
            })
        );
        assert!(matches!(
            FamilyId::new("family 1".to_string()),
            Err(ValueObjectError::InvalidFamilyId(_))
        ));
    }

    #[test]
    fn test_family_id_default() {
        // テスト項目: デフォルトの family id は "default"
        // when (操作):
        let family = FamilyId::default();

        // then (期待する結果):
        assert_eq!(family.as_str(), "default");
    }

    #[test]
    fn test_connection_id_parses_uuid() {
        // テスト項目: UUID 文字列から ConnectionId を生成でき、不正な文字列は拒否される
        // given (前提条件):
        let uuid = Uuid::new_v4();

        // when (操作):
        let parsed = ConnectionId::try_from(uuid.to_string().as_str());
        let invalid = ConnectionId::try_from("not-a-uuid");

        // then (期待する結果):
        assert_eq!(parsed.unwrap().value(), uuid);
        assert!(matches!(
            invalid,
            Err(ValueObjectError::InvalidConnectionId(_))
        ));
    }
}
