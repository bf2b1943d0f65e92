//! Entity 定義

use serde::Serialize;

use super::value_object::{EndpointId, RoomId, SessionId, Timestamp};

/// 接続レコード
///
/// Room に参加している endpoint 1 つにつき 1 レコード。
/// `(room_id, endpoint_id)` をキーとし、同一キーへの再 join は
/// レコード全体の置き換えになります（部分更新はありません）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionRecord {
    /// 参加している Room の識別子（パーティションキー）
    pub room_id: RoomId,
    /// Endpoint の識別子（Room 内のソートキー、グローバルに一意）
    pub endpoint_id: EndpointId,
    /// クライアントが選んだセッション識別子
    pub session_id: SessionId,
    /// タイマー更新をブロードキャストできる creator 権限フラグ。
    /// join 時に決まり、以後変更されません。
    pub is_creator: bool,
    /// join した時刻
    pub joined_at: Timestamp,
}

impl ConnectionRecord {
    /// 新しい接続レコードを作成
    pub fn new(
        room_id: RoomId,
        endpoint_id: EndpointId,
        session_id: SessionId,
        is_creator: bool,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            room_id,
            endpoint_id,
            session_id,
            is_creator,
            joined_at,
        }
    }
}
