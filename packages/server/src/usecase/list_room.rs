//! UseCase: Room 接続一覧の取得処理

use std::sync::Arc;

use crate::domain::{ConnectionRecord, ConnectionRegistry, RoomId};

use super::error::ListRoomError;

/// Room 接続一覧取得のユースケース
///
/// 運用向けの HTTP エンドポイントから使われます。レジストリの列挙順は
/// 未規定なので、出力を安定させるためにソートして返します。
pub struct ListRoomConnectionsUseCase {
    /// Registry（接続レコードの永続化の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl ListRoomConnectionsUseCase {
    /// 新しい ListRoomConnectionsUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Room の接続一覧を取得
    ///
    /// # Returns
    ///
    /// 参加時刻、同時刻なら endpoint_id でソートした接続レコードのリスト
    pub async fn execute(&self, room_id: &RoomId) -> Result<Vec<ConnectionRecord>, ListRoomError> {
        let mut records = self
            .registry
            .list_room(room_id)
            .await
            .map_err(|e| ListRoomError::Storage(e.to_string()))?;

        records.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.endpoint_id.as_str().cmp(b.endpoint_id.as_str()))
        });

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EndpointId, SessionId, Timestamp};
    use crate::infrastructure::registry::InMemoryConnectionRegistry;

    fn record_at(room: &str, endpoint: &str, joined_at: i64) -> ConnectionRecord {
        ConnectionRecord::new(
            RoomId::new(room.to_string()).unwrap(),
            EndpointId::new(endpoint.to_string()).unwrap(),
            SessionId::new(format!("session-{endpoint}")).unwrap(),
            false,
            Timestamp::new(joined_at),
        )
    }

    #[tokio::test]
    async fn test_list_room_sorted_by_join_time() {
        // テスト項目: 接続一覧が参加時刻順にソートされて返される
        // given (前提条件): 参加順と逆の時刻で join
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        registry
            .join(record_at("abc123", "ep-late", 3000))
            .await
            .unwrap();
        registry
            .join(record_at("abc123", "ep-early", 1000))
            .await
            .unwrap();
        registry
            .join(record_at("abc123", "ep-middle", 2000))
            .await
            .unwrap();
        let usecase = ListRoomConnectionsUseCase::new(registry);

        // when (操作):
        let room_id = RoomId::new("abc123".to_string()).unwrap();
        let result = usecase.execute(&room_id).await.unwrap();

        // then (期待する結果):
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].endpoint_id.as_str(), "ep-early");
        assert_eq!(result[1].endpoint_id.as_str(), "ep-middle");
        assert_eq!(result[2].endpoint_id.as_str(), "ep-late");
    }

    #[tokio::test]
    async fn test_list_room_ties_broken_by_endpoint_id() {
        // テスト項目: 同時刻の参加は endpoint_id 順で安定する
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        registry
            .join(record_at("abc123", "ep-b", 1000))
            .await
            .unwrap();
        registry
            .join(record_at("abc123", "ep-a", 1000))
            .await
            .unwrap();
        let usecase = ListRoomConnectionsUseCase::new(registry);

        // when (操作):
        let room_id = RoomId::new("abc123".to_string()).unwrap();
        let result = usecase.execute(&room_id).await.unwrap();

        // then (期待する結果):
        assert_eq!(result[0].endpoint_id.as_str(), "ep-a");
        assert_eq!(result[1].endpoint_id.as_str(), "ep-b");
    }

    #[tokio::test]
    async fn test_list_room_with_unknown_room_is_empty() {
        // テスト項目: 存在しない Room の一覧は空になる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = ListRoomConnectionsUseCase::new(registry);

        // when (操作):
        let room_id = RoomId::new("nowhere".to_string()).unwrap();
        let result = usecase.execute(&room_id).await.unwrap();

        // then (期待する結果):
        assert_eq!(result.len(), 0);
    }
}
