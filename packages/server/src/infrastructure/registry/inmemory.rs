//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! HashMap をインメモリストアとして使用します。
//!
//! Room ごとのレコードマップと endpoint → room の逆引きインデックスを
//! 1 つの Mutex の下で保持します。両者が常に同時に更新されるため、
//! インデックスが宙に浮くことはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionRecord, ConnectionRegistry, EndpointId, RegistryError, RoomId,
};

/// レジストリの内部状態
#[derive(Default)]
struct RegistryState {
    /// room_id → (endpoint_id → record)
    rooms: HashMap<RoomId, HashMap<EndpointId, ConnectionRecord>>,
    /// endpoint_id → room_id の逆引きインデックス
    endpoint_index: HashMap<EndpointId, RoomId>,
}

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn join(&self, record: ConnectionRecord) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;

        // endpoint_id はグローバルに一意。別の Room に同じ endpoint の
        // レコードが残っていたら、それを先に落とす。
        if let Some(prev_room) = state
            .endpoint_index
            .insert(record.endpoint_id.clone(), record.room_id.clone())
            && prev_room != record.room_id
        {
            if let Some(room) = state.rooms.get_mut(&prev_room) {
                room.remove(&record.endpoint_id);
                if room.is_empty() {
                    state.rooms.remove(&prev_room);
                }
            }
        }

        state
            .rooms
            .entry(record.room_id.clone())
            .or_default()
            .insert(record.endpoint_id.clone(), record);

        Ok(())
    }

    async fn list_room(&self, room_id: &RoomId) -> Result<Vec<ConnectionRecord>, RegistryError> {
        let state = self.state.lock().await;
        Ok(state
            .rooms
            .get(room_id)
            .map(|room| room.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn remove(
        &self,
        room_id: &RoomId,
        endpoint_id: &EndpointId,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;

        if let Some(room) = state.rooms.get_mut(room_id) {
            room.remove(endpoint_id);
            if room.is_empty() {
                state.rooms.remove(room_id);
            }
        }

        // インデックスは、この Room を指している場合だけ消す
        if state.endpoint_index.get(endpoint_id) == Some(room_id) {
            state.endpoint_index.remove(endpoint_id);
        }

        Ok(())
    }

    async fn room_of(&self, endpoint_id: &EndpointId) -> Option<RoomId> {
        let state = self.state.lock().await;
        state.endpoint_index.get(endpoint_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SessionId, Timestamp};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryConnectionRegistry の upsert / 取得 / 削除
    // - 同一キーへの再 join がレコードを置き換えること（冪等性）
    // - 逆引きインデックスがレコードと同期して更新されること
    //
    // 【なぜこのテストが必要か】
    // - Registry は Broadcast Engine と認可チェックのデータ源
    // - 再 join で重複レコードができるとブロードキャストが二重配送になる
    // - インデックスの不整合は切断処理のリークにつながる
    //
    // 【どのようなシナリオをテストするか】
    // 1. join と list_room の成功ケース
    // 2. 同一 (room, endpoint) への再 join（上書き）
    // 3. 存在しないレコードの削除（no-op）
    // 4. 逆引きの成功・削除後の失敗ケース
    // 5. 別 Room への再 join で古いレコードが落ちること
    // ========================================

    fn create_record(room: &str, endpoint: &str, session: &str, is_creator: bool) -> ConnectionRecord {
        ConnectionRecord::new(
            RoomId::new(room.to_string()).unwrap(),
            EndpointId::new(endpoint.to_string()).unwrap(),
            SessionId::new(session.to_string()).unwrap(),
            is_creator,
            Timestamp::new(1700000000000),
        )
    }

    #[tokio::test]
    async fn test_join_and_list_room() {
        // テスト項目: join したレコードが list_room から見える
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let room_id = RoomId::new("abc123".to_string()).unwrap();

        // when (操作):
        registry
            .join(create_record("abc123", "ep-1", "alice", true))
            .await
            .unwrap();
        registry
            .join(create_record("abc123", "ep-2", "bob", false))
            .await
            .unwrap();

        // then (期待する結果):
        let records = registry.list_room(&room_id).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_join_is_idempotent_upsert() {
        // テスト項目: 同一 (room, endpoint) への再 join はレコード数を変えず、
        // 最新の session_id / is_creator だけが見える
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let room_id = RoomId::new("abc123".to_string()).unwrap();
        registry
            .join(create_record("abc123", "ep-1", "alice", false))
            .await
            .unwrap();

        // when (操作): 同じ endpoint で creator として再 join
        registry
            .join(create_record("abc123", "ep-1", "alice-reconnected", true))
            .await
            .unwrap();

        // then (期待する結果):
        let records = registry.list_room(&room_id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].session_id.as_str(), "alice-reconnected");
        assert!(records[0].is_creator);
    }

    #[tokio::test]
    async fn test_list_room_with_unknown_room() {
        // テスト項目: 存在しない Room の list_room は空のリストを返す
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();

        // when (操作):
        let room_id = RoomId::new("nowhere".to_string()).unwrap();
        let records = registry.list_room(&room_id).await.unwrap();

        // then (期待する結果):
        assert_eq!(records.len(), 0);
    }

    #[tokio::test]
    async fn test_remove_deletes_record() {
        // テスト項目: remove したレコードが list_room から消える
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let room_id = RoomId::new("abc123".to_string()).unwrap();
        let endpoint_id = EndpointId::new("ep-1".to_string()).unwrap();
        registry
            .join(create_record("abc123", "ep-1", "alice", true))
            .await
            .unwrap();
        registry
            .join(create_record("abc123", "ep-2", "bob", false))
            .await
            .unwrap();

        // when (操作):
        registry.remove(&room_id, &endpoint_id).await.unwrap();

        // then (期待する結果):
        let records = registry.list_room(&room_id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].endpoint_id.as_str(), "ep-2");
    }

    #[tokio::test]
    async fn test_remove_nonexistent_record_is_noop() {
        // テスト項目: 存在しないレコードの削除は no-op でエラーにならない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let room_id = RoomId::new("abc123".to_string()).unwrap();
        let endpoint_id = EndpointId::new("ep-404".to_string()).unwrap();

        // when (操作):
        let result = registry.remove(&room_id, &endpoint_id).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_room_of_returns_joined_room() {
        // テスト項目: join 済み endpoint の Room を逆引きできる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        registry
            .join(create_record("abc123", "ep-1", "alice", true))
            .await
            .unwrap();

        // when (操作):
        let endpoint_id = EndpointId::new("ep-1".to_string()).unwrap();
        let result = registry.room_of(&endpoint_id).await;

        // then (期待する結果):
        assert_eq!(result, Some(RoomId::new("abc123".to_string()).unwrap()));
    }

    #[tokio::test]
    async fn test_room_of_after_remove_returns_none() {
        // テスト項目: remove 後は逆引きが None を返す
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let room_id = RoomId::new("abc123".to_string()).unwrap();
        let endpoint_id = EndpointId::new("ep-1".to_string()).unwrap();
        registry
            .join(create_record("abc123", "ep-1", "alice", true))
            .await
            .unwrap();

        // when (操作):
        registry.remove(&room_id, &endpoint_id).await.unwrap();

        // then (期待する結果):
        assert_eq!(registry.room_of(&endpoint_id).await, None);
    }

    #[tokio::test]
    async fn test_join_to_different_room_moves_record() {
        // テスト項目: 同じ endpoint が別の Room に join すると古いレコードが落ちる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        registry
            .join(create_record("room-a", "ep-1", "alice", true))
            .await
            .unwrap();

        // when (操作):
        registry
            .join(create_record("room-b", "ep-1", "alice", true))
            .await
            .unwrap();

        // then (期待する結果):
        let room_a = RoomId::new("room-a".to_string()).unwrap();
        let room_b = RoomId::new("room-b".to_string()).unwrap();
        assert_eq!(registry.list_room(&room_a).await.unwrap().len(), 0);
        assert_eq!(registry.list_room(&room_b).await.unwrap().len(), 1);

        let endpoint_id = EndpointId::new("ep-1".to_string()).unwrap();
        assert_eq!(registry.room_of(&endpoint_id).await, Some(room_b));
    }
}
