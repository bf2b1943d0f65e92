//! UseCase: タイマー更新のブロードキャスト処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastTimerUseCase::execute() メソッド
//! - ブロードキャスト処理（認可、発信元の除外、並行配送、gone の prune）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：creator だけがブロードキャストを発信できる
//! - 発信元自身には決して配送されないことを確認
//! - 配送失敗の分類（delivered / pruned / transient）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：creator から他の全 endpoint への配送
//! - 異常系：非 creator の発信、空ペイロード、ストア障害
//! - エッジケース：creator のみの Room、gone endpoint の prune

use std::sync::Arc;

use crate::domain::{
    ConnectionRegistry, EndpointId, PushError, RoomId, UpdatePusher,
    room::{broadcast_targets, holds_creator_privilege},
};

use super::error::BroadcastTimerError;

/// ブロードキャスト 1 回分の集計結果
///
/// 全ての配送が確定（成功 / gone / transient）した後に返されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// 配送に成功した endpoint 数
    pub delivered: usize,
    /// gone と判定され、レジストリから削除された endpoint 数
    pub pruned: usize,
}

/// タイマー更新ブロードキャストのユースケース
pub struct BroadcastTimerUseCase {
    /// Registry（接続レコードの永続化の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// UpdatePusher（プッシュ配送の抽象化）
    pusher: Arc<dyn UpdatePusher>,
}

impl BroadcastTimerUseCase {
    /// 新しい BroadcastTimerUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>, pusher: Arc<dyn UpdatePusher>) -> Self {
        Self { registry, pusher }
    }

    /// ブロードキャストを実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 配送先の Room（Domain Model）
    /// * `origin_endpoint_id` - 発信元の endpoint（配送対象から除外される）
    /// * `payload` - 配送する JSON ペイロード（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastOutcome)` - 全配送確定後の集計
    /// * `Err(BroadcastTimerError)` - 認可・検証・ストアのエラー
    pub async fn execute(
        &self,
        room_id: &RoomId,
        origin_endpoint_id: &EndpointId,
        payload: String,
    ) -> Result<BroadcastOutcome, BroadcastTimerError> {
        if payload.is_empty() {
            return Err(BroadcastTimerError::EmptyPayload);
        }

        // 1. Room の接続一覧を取得
        let records = self
            .registry
            .list_room(room_id)
            .await
            .map_err(|e| BroadcastTimerError::Storage(e.to_string()))?;

        // 2. 認可チェック（毎回、直近の一覧から判定する）
        if !holds_creator_privilege(&records, origin_endpoint_id) {
            tracing::warn!(
                "Endpoint '{}' attempted broadcast to room '{}' without creator privilege",
                origin_endpoint_id.as_str(),
                room_id.as_str()
            );
            return Err(BroadcastTimerError::NotAuthorized);
        }

        // 3. 発信元を除いた対象へ、endpoint ごとに独立したタスクで配送
        let targets = broadcast_targets(&records, origin_endpoint_id);
        let payload = Arc::new(payload);

        let mut attempts = Vec::with_capacity(targets.len());
        for target in targets {
            let pusher = Arc::clone(&self.pusher);
            let payload = Arc::clone(&payload);
            attempts.push(tokio::spawn(async move {
                let result = pusher.push_to(&target.endpoint_id, &payload).await;
                (target.endpoint_id, result)
            }));
        }

        // 4. 全タスクの確定を待ち、結果を分類する（join バリア）
        let mut outcome = BroadcastOutcome {
            delivered: 0,
            pruned: 0,
        };
        for attempt in attempts {
            match attempt.await {
                Ok((_, Ok(()))) => {
                    outcome.delivered += 1;
                }
                Ok((endpoint_id, Err(PushError::Gone))) => {
                    self.prune_stale(room_id, &endpoint_id).await;
                    outcome.pruned += 1;
                }
                Ok((endpoint_id, Err(PushError::Transient(reason)))) => {
                    // リトライはこの層では行わない
                    tracing::warn!(
                        "Transient push failure to endpoint '{}': {}",
                        endpoint_id.as_str(),
                        reason
                    );
                }
                Err(e) => {
                    tracing::warn!("Push task failed to complete: {}", e);
                }
            }
        }

        tracing::debug!(
            "Broadcast to room '{}' settled: delivered={}, pruned={}",
            room_id.as_str(),
            outcome.delivered,
            outcome.pruned
        );

        Ok(outcome)
    }

    /// gone と判定された endpoint のレコードを削除
    ///
    /// ベストエフォートのクリーンアップ。失敗してもブロードキャスト全体は
    /// 失敗しません。
    async fn prune_stale(&self, room_id: &RoomId, endpoint_id: &EndpointId) {
        if let Err(e) = self.registry.remove(room_id, endpoint_id).await {
            tracing::warn!(
                "Failed to prune stale endpoint '{}' from room '{}': {}",
                endpoint_id.as_str(),
                room_id.as_str(),
                e
            );
        } else {
            tracing::info!(
                "Pruned stale endpoint '{}' from room '{}'",
                endpoint_id.as_str(),
                room_id.as_str()
            );
        }
        self.pusher.unregister_endpoint(endpoint_id).await;
    }
}
