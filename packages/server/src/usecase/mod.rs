//! UseCase 層
//!
//! 1 操作につき 1 つの UseCase struct。Repository / Pusher の trait にのみ
//! 依存し、Infrastructure 層の具体的な実装には依存しません。

pub mod broadcast_timer;
pub mod disconnect_endpoint;
pub mod error;
pub mod join_room;
pub mod list_room;

pub use broadcast_timer::{BroadcastOutcome, BroadcastTimerUseCase};
pub use disconnect_endpoint::DisconnectEndpointUseCase;
pub use error::{BroadcastTimerError, DisconnectError, JoinRoomError, ListRoomError};
pub use join_room::JoinRoomUseCase;
pub use list_room::ListRoomConnectionsUseCase;
