//! UseCase: Room への参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加処理（レコードの upsert、送信チャンネルの登録）
//!
//! ### なぜこのテストが必要か
//! - 参加が upsert であること（同一 endpoint の再 join は上書き）を保証
//! - join 直後の認可チェックからレコードが見えることを確認
//! - ストア障害時に送信チャンネルが登録されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規 endpoint の参加
//! - エッジケース：同一 endpoint での再 join（重複エラーにはならない）
//! - 異常系：ストア障害

use std::sync::Arc;

use sunadokei_shared::time::Clock;

use crate::domain::{
    ConnectionRecord, ConnectionRegistry, EndpointId, PushChannel, RoomId, SessionId, Timestamp,
    UpdatePusher,
};

use super::error::JoinRoomError;

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（接続レコードの永続化の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// UpdatePusher（プッシュ配送の抽象化）
    pusher: Arc<dyn UpdatePusher>,
    /// Clock（現在時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        pusher: Arc<dyn UpdatePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            pusher,
            clock,
        }
    }

    /// 参加を実行
    ///
    /// `(room_id, endpoint_id)` をキーとした冪等な upsert。同一 endpoint の
    /// 再 join は既存レコードを置き換えるだけで、エラーにはなりません。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加する Room（Domain Model）
    /// * `endpoint_id` - サーバが採番した endpoint の識別子
    /// * `session_id` - クライアントが選んだセッション識別子
    /// * `is_creator` - creator 権限フラグ（join 時に確定、以後不変）
    /// * `sender` - endpoint への送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 参加成功（参加時刻を返す）
    /// * `Err(JoinRoomError)` - ストア障害
    pub async fn execute(
        &self,
        room_id: RoomId,
        endpoint_id: EndpointId,
        session_id: SessionId,
        is_creator: bool,
        sender: PushChannel,
    ) -> Result<Timestamp, JoinRoomError> {
        let joined_at = Timestamp::new(self.clock.now_millis());

        // 1. Registry にレコードを upsert
        let record = ConnectionRecord::new(
            room_id,
            endpoint_id.clone(),
            session_id,
            is_creator,
            joined_at,
        );
        self.registry
            .join(record)
            .await
            .map_err(|e| JoinRoomError::Storage(e.to_string()))?;

        // 2. UpdatePusher に送信チャンネルを登録
        self.pusher.register_endpoint(endpoint_id, sender).await;

        Ok(joined_at)
    }
}
