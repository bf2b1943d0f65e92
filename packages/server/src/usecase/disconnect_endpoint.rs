//! UseCase: Endpoint の切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectEndpointUseCase::execute() メソッド
//! - 明示的な切断処理（逆引きインデックスによるレコード削除）
//!
//! ### なぜこのテストが必要か
//! - 切断はブロードキャスト失敗を待たずに逆引きで定数時間に処理される
//! - 未知の endpoint の切断が no-op であること（冪等性）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済み endpoint の切断
//! - エッジケース：未知の endpoint の切断（no-op）

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, EndpointId, RoomId, UpdatePusher};

use super::error::DisconnectError;

/// Endpoint 切断のユースケース
pub struct DisconnectEndpointUseCase {
    /// Registry（接続レコードの永続化の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// UpdatePusher（プッシュ配送の抽象化）
    pusher: Arc<dyn UpdatePusher>,
}

impl DisconnectEndpointUseCase {
    /// 新しい DisconnectEndpointUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>, pusher: Arc<dyn UpdatePusher>) -> Self {
        Self { registry, pusher }
    }

    /// 切断を実行
    ///
    /// 逆引きインデックスで Room を特定し、レコードと送信チャンネルを
    /// 取り除きます。レコードを持たない endpoint の切断は no-op です。
    ///
    /// # Arguments
    ///
    /// * `endpoint_id` - 切断する endpoint の識別子
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RoomId))` - 切断成功（離脱した Room を返す）
    /// * `Ok(None)` - endpoint はどの Room にも参加していなかった
    /// * `Err(DisconnectError)` - ストア障害
    pub async fn execute(
        &self,
        endpoint_id: &EndpointId,
    ) -> Result<Option<RoomId>, DisconnectError> {
        // 1. 逆引きインデックスで Room を特定
        let room_id = self.registry.room_of(endpoint_id).await;

        // 2. レコードを削除（存在しない場合は no-op）
        if let Some(ref room_id) = room_id {
            self.registry
                .remove(room_id, endpoint_id)
                .await
                .map_err(|e| DisconnectError::Storage(e.to_string()))?;
        }

        // 3. 送信チャンネルを登録解除
        self.pusher.unregister_endpoint(endpoint_id).await;

        Ok(room_id)
    }
}
