//! UseCase 層のエラー型定義

use thiserror::Error;

/// 参加処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("failed to store connection record: {0}")]
    Storage(String),
}

/// タイマー更新ブロードキャストのエラー
///
/// 個々の peer への配送失敗はここに現れません。gone は prune で回収され、
/// transient はログに残して吸収されます。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BroadcastTimerError {
    /// ペイロードが空
    #[error("broadcast payload must not be empty")]
    EmptyPayload,

    /// 発信元が creator 権限を持たない（レコードなし、または is_creator が false）
    #[error("origin endpoint is not a creator of the room")]
    NotAuthorized,

    /// レジストリの読み取りに失敗した
    #[error("failed to read connection records: {0}")]
    Storage(String),
}

/// 切断処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("failed to remove connection record: {0}")]
    Storage(String),
}

/// Room 接続一覧取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListRoomError {
    #[error("failed to read connection records: {0}")]
    Storage(String),
}
