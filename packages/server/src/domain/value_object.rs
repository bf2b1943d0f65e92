//! Value Object 定義
//!
//! ドメイン層の値オブジェクト。生成時にバリデーションを行い、
//! 不正な値がドメイン内に入り込まないことを保証します。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Room ID の最大長（文字数）
const MAX_ROOM_ID_LENGTH: usize = 64;

/// Session ID の最大長（文字数）
const MAX_SESSION_ID_LENGTH: usize = 64;

/// Room（リーグセッション）の識別子
///
/// クライアントが指定する文字列。ブロードキャストのパーティションキー。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// 新しい RoomId を作成（空文字・長すぎる値はエラー）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        let len = value.chars().count();
        if len > MAX_ROOM_ID_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong {
                len,
                max: MAX_ROOM_ID_LENGTH,
            });
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

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// クライアントが選ぶセッション識別子
///
/// 再接続の相関に使われます。一意性は要求されません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// 新しい SessionId を作成（空文字・長すぎる値はエラー）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptySessionId);
        }
        let len = value.chars().count();
        if len > MAX_SESSION_ID_LENGTH {
            return Err(ValueObjectError::SessionIdTooLong {
                len,
                max: MAX_SESSION_ID_LENGTH,
            });
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

impl TryFrom<String> for SessionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ネットワーク endpoint の不透明な識別子
///
/// サーバ側で接続ごとに採番されます（[`EndpointIdFactory`]）。
/// Room 内でソートキー、かつグローバルに一意。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointId(String);

impl EndpointId {
    /// 既存の識別子文字列から EndpointId を作成（空文字はエラー）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyEndpointId);
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

impl TryFrom<String> for EndpointId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// EndpointId のファクトリ
pub struct EndpointIdFactory;

impl EndpointIdFactory {
    /// 新しい EndpointId を採番（UUID v4）
    pub fn generate() -> EndpointId {
        EndpointId(Uuid::new_v4().to_string())
    }
}

/// Unix タイムスタンプ（ミリ秒）のラッパー
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_new_success() {
        // テスト項目: 通常の文字列から RoomId を作成できる
        // given (前提条件):
        let value = "abc123".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_room_id_new_empty_error() {
        // テスト項目: 空文字から RoomId を作成するとエラーになる
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomId));
    }

    #[test]
    fn test_room_id_new_too_long_error() {
        // テスト項目: 最大長を超える RoomId はエラーになる
        // given (前提条件):
        let value = "a".repeat(MAX_ROOM_ID_LENGTH + 1);

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::RoomIdTooLong {
                len: MAX_ROOM_ID_LENGTH + 1,
                max: MAX_ROOM_ID_LENGTH,
            })
        );
    }

    #[test]
    fn test_room_id_new_at_max_length() {
        // テスト項目: ちょうど最大長の RoomId は作成できる
        // given (前提条件):
        let value = "a".repeat(MAX_ROOM_ID_LENGTH);

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_session_id_new_empty_error() {
        // テスト項目: 空文字から SessionId を作成するとエラーになる
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = SessionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptySessionId));
    }

    #[test]
    fn test_endpoint_id_new_empty_error() {
        // テスト項目: 空文字から EndpointId を作成するとエラーになる
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = EndpointId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyEndpointId));
    }

    #[test]
    fn test_endpoint_id_factory_generates_unique_ids() {
        // テスト項目: ファクトリが一意な EndpointId を採番する
        // given (前提条件):

        // when (操作):
        let id1 = EndpointIdFactory::generate();
        let id2 = EndpointIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_timestamp_value_roundtrip() {
        // テスト項目: Timestamp が保持した値をそのまま返す
        // given (前提条件):
        let millis = 1700000000000;

        // when (操作):
        let timestamp = Timestamp::new(millis);

        // then (期待する結果):
        assert_eq!(timestamp.value(), millis);
    }
}
