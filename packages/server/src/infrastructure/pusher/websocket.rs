//! WebSocket を使った UpdatePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を endpoint ごとに管理
//! - 単一 endpoint へのペイロード送信（push_to）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、送信に使用します。
//!
//! unbounded channel の send は受信側が drop された場合にのみ失敗するため、
//! この transport の失敗は常に `PushError::Gone` に分類されます。
//! `Transient` を返すのはタイムアウトを持つ別の transport 実装です。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{EndpointId, PushChannel, PushError, UpdatePusher};

/// WebSocket を使った UpdatePusher 実装
#[derive(Default)]
pub struct WebSocketUpdatePusher {
    /// 接続中 endpoint の送信チャンネル
    endpoints: Mutex<HashMap<EndpointId, PushChannel>>,
}

impl WebSocketUpdatePusher {
    /// 新しい WebSocketUpdatePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UpdatePusher for WebSocketUpdatePusher {
    async fn register_endpoint(&self, endpoint_id: EndpointId, sender: PushChannel) {
        let mut endpoints = self.endpoints.lock().await;
        endpoints.insert(endpoint_id.clone(), sender);
        tracing::debug!("Endpoint '{}' registered to UpdatePusher", endpoint_id.as_str());
    }

    async fn unregister_endpoint(&self, endpoint_id: &EndpointId) {
        let mut endpoints = self.endpoints.lock().await;
        endpoints.remove(endpoint_id);
        tracing::debug!(
            "Endpoint '{}' unregistered from UpdatePusher",
            endpoint_id.as_str()
        );
    }

    async fn push_to(&self, endpoint_id: &EndpointId, payload: &str) -> Result<(), PushError> {
        let endpoints = self.endpoints.lock().await;

        let Some(sender) = endpoints.get(endpoint_id) else {
            return Err(PushError::Gone);
        };

        if sender.send(payload.to_string()).is_err() {
            // 受信側が既に drop されている
            return Err(PushError::Gone);
        }

        tracing::debug!("Pushed update to endpoint '{}'", endpoint_id.as_str());
        Ok(())
    }
}
