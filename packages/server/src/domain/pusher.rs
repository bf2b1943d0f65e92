//! Update Pusher trait 定義
//!
//! タイマー更新を endpoint へ届けるプッシュ配送のインターフェース。
//! Broadcast Engine が peer に到達する唯一の経路です。
//!
//! ## 設計ノート
//!
//! ファンアウト（対象の選定と並行配送）は UseCase 層の Broadcast Engine が
//! 持ちます。この trait が提供するのは単一 endpoint への送信だけです。
//! これにより、配送ごとの成否（delivered / gone / transient）を
//! Engine 側で捕捉できます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{EndpointId, PushError};

/// Endpoint へメッセージを送るためのチャンネル
pub type PushChannel = mpsc::UnboundedSender<String>;

/// Update Pusher trait
#[async_trait]
pub trait UpdatePusher: Send + Sync {
    /// Endpoint の送信チャンネルを登録
    async fn register_endpoint(&self, endpoint_id: EndpointId, sender: PushChannel);

    /// Endpoint の送信チャンネルを登録解除
    async fn unregister_endpoint(&self, endpoint_id: &EndpointId);

    /// ペイロードを単一の endpoint へ送信
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 配送成功
    /// * `Err(PushError::Gone)` - endpoint は恒久的に到達不能
    /// * `Err(PushError::Transient)` - 一時的な失敗（この層ではリトライしない）
    async fn push_to(&self, endpoint_id: &EndpointId, payload: &str) -> Result<(), PushError>;
}
