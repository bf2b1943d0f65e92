//! Connection Registry trait 定義
//!
//! ドメイン層が必要とする接続レコードの永続化インターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## ストア契約
//!
//! この trait はキー付きストアの契約そのものです：
//! パーティションキーが `room_id`、ソートキーが `endpoint_id`。
//! upsert / クエリ / 削除のみで、レコードをまたぐトランザクションはありません。

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{ConnectionRecord, EndpointId, RegistryError, RoomId};

/// Connection Registry trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しません。すべての読み取りは直近の書き込みを反映します
/// （直前に完了した join は次の認可チェックから見えること）。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続レコードを upsert
    ///
    /// `(room_id, endpoint_id)` をキーとした冪等な書き込み。
    /// 同一キーのレコードが既にあれば全体を置き換えます。
    async fn join(&self, record: ConnectionRecord) -> Result<(), RegistryError>;

    /// Room に現在参加している全ての接続レコードを取得（順序は未規定）
    async fn list_room(&self, room_id: &RoomId) -> Result<Vec<ConnectionRecord>, RegistryError>;

    /// 接続レコードを削除
    ///
    /// 存在しないレコードの削除は no-op であり、エラーになりません。
    async fn remove(&self, room_id: &RoomId, endpoint_id: &EndpointId)
    -> Result<(), RegistryError>;

    /// Endpoint が参加している Room を逆引き
    ///
    /// 明示的な切断を、将来のブロードキャスト失敗を待たずに
    /// 定数時間で処理するための二次インデックス。
    async fn room_of(&self, endpoint_id: &EndpointId) -> Option<RoomId>;
}
