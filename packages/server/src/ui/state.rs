//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    BroadcastTimerUseCase, DisconnectEndpointUseCase, JoinRoomUseCase, ListRoomConnectionsUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（Room 参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// BroadcastTimerUseCase（タイマー更新ブロードキャストのユースケース）
    pub broadcast_timer_usecase: Arc<BroadcastTimerUseCase>,
    /// DisconnectEndpointUseCase（切断のユースケース）
    pub disconnect_endpoint_usecase: Arc<DisconnectEndpointUseCase>,
    /// ListRoomConnectionsUseCase（Room 接続一覧取得のユースケース）
    pub list_room_usecase: Arc<ListRoomConnectionsUseCase>,
}
