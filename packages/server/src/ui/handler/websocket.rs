//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{EndpointId, EndpointIdFactory, RoomId, SessionId},
    infrastructure::dto::websocket::{ClientMessage, ErrorCode, ServerMessage},
    ui::state::AppState,
    usecase::BroadcastTimerError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Serialize a server message and send it over the raw socket sink.
///
/// Used before the pusher loop takes ownership of the sink; afterwards all
/// outbound traffic goes through the endpoint's push channel.
async fn send_direct(
    sender: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(message).unwrap();
    sender.send(Message::Text(json.into())).await
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This function handles the outbound message flow: timer updates and acks
/// addressed to this endpoint (via its push channel) are written to the
/// WebSocket connection.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages addressed to this endpoint
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // The first frame of a connection must be a typed join message
    let first_frame = loop {
        match receiver.next().await {
            Some(Ok(Message::Text(text))) => break text,
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None => return,
            Some(Ok(_)) => {
                let reply = ServerMessage::Error {
                    code: ErrorCode::BadRequest,
                    message: "expected a text join frame".to_string(),
                };
                let _ = send_direct(&mut sender, &reply).await;
                return;
            }
            Some(Err(e)) => {
                tracing::error!("WebSocket error before join: {}", e);
                return;
            }
        }
    };

    let (room_id_raw, session_id_raw, is_creator) =
        match serde_json::from_str::<ClientMessage>(&first_frame) {
            Ok(ClientMessage::Join {
                room_id,
                session_id,
                is_creator,
            }) => (room_id, session_id, is_creator),
            Ok(_) => {
                let reply = ServerMessage::Error {
                    code: ErrorCode::BadRequest,
                    message: "expected a join message as the first frame".to_string(),
                };
                let _ = send_direct(&mut sender, &reply).await;
                return;
            }
            Err(e) => {
                tracing::warn!("Malformed join frame: {}", e);
                let reply = ServerMessage::Error {
                    code: ErrorCode::BadRequest,
                    message: format!("malformed join message: {e}"),
                };
                let _ = send_direct(&mut sender, &reply).await;
                return;
            }
        };

    // Convert String -> Domain Models
    let (room_id, session_id) = match (
        RoomId::try_from(room_id_raw),
        SessionId::try_from(session_id_raw),
    ) {
        (Ok(room_id), Ok(session_id)) => (room_id, session_id),
        (Err(e), _) | (_, Err(e)) => {
            let reply = ServerMessage::Error {
                code: ErrorCode::BadRequest,
                message: e.to_string(),
            };
            let _ = send_direct(&mut sender, &reply).await;
            return;
        }
    };

    // Assign this connection an opaque endpoint id and create its push channel
    let endpoint_id = EndpointIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    let reply_tx = tx.clone();

    let joined_at = match state
        .join_room_usecase
        .execute(
            room_id.clone(),
            endpoint_id.clone(),
            session_id.clone(),
            is_creator,
            tx,
        )
        .await
    {
        Ok(joined_at) => joined_at,
        Err(e) => {
            tracing::error!(
                "Failed to join endpoint '{}' to room '{}': {}",
                endpoint_id.as_str(),
                room_id.as_str(),
                e
            );
            let reply = ServerMessage::Error {
                code: ErrorCode::Internal,
                message: "failed to join room".to_string(),
            };
            let _ = send_direct(&mut sender, &reply).await;
            return;
        }
    };

    tracing::info!(
        "Endpoint '{}' (session '{}') joined room '{}'",
        endpoint_id.as_str(),
        session_id.as_str(),
        room_id.as_str()
    );

    // Acknowledge the join before entering the message loops
    let joined = ServerMessage::Joined {
        room_id: room_id.as_str().to_string(),
        joined_at: joined_at.value(),
    };
    if send_direct(&mut sender, &joined).await.is_err() {
        let _ = state.disconnect_endpoint_usecase.execute(&endpoint_id).await;
        return;
    }

    // Spawn a task to push messages addressed to this endpoint
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive messages from this client
    let state_clone = state.clone();
    let endpoint_id_clone = endpoint_id.clone();
    let mut recv_task = tokio::spawn(async move {
        receive_loop(receiver, state_clone, endpoint_id_clone, reply_tx).await;
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the connection record in constant time via the reverse index
    match state.disconnect_endpoint_usecase.execute(&endpoint_id).await {
        Ok(Some(left_room)) => {
            tracing::info!(
                "Endpoint '{}' disconnected from room '{}'",
                endpoint_id.as_str(),
                left_room.as_str()
            );
        }
        Ok(None) => {
            // Already pruned by a failed broadcast
            tracing::debug!(
                "Endpoint '{}' disconnected with no registry record",
                endpoint_id.as_str()
            );
        }
        Err(e) => {
            tracing::warn!(
                "Failed to disconnect endpoint '{}': {}",
                endpoint_id.as_str(),
                e
            );
        }
    }
}

/// Handle inbound frames until the client goes away.
async fn receive_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    state: Arc<AppState>,
    endpoint_id: EndpointId,
    reply_tx: mpsc::UnboundedSender<String>,
) {
    let reply = |message: ServerMessage| {
        let json = serde_json::to_string(&message).unwrap();
        reply_tx.send(json)
    };

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::TimerBroadcast {
                        room_id,
                        timer_state,
                    }) => {
                        let room_id = match RoomId::try_from(room_id) {
                            Ok(id) => id,
                            Err(e) => {
                                if reply(ServerMessage::Error {
                                    code: ErrorCode::BadRequest,
                                    message: e.to_string(),
                                })
                                .is_err()
                                {
                                    break;
                                }
                                continue;
                            }
                        };

                        // The delivered payload is built here so the engine
                        // stays payload-agnostic
                        let update = ServerMessage::TimerUpdate { timer_state };
                        let payload = serde_json::to_string(&update).unwrap();

                        let response = match state
                            .broadcast_timer_usecase
                            .execute(&room_id, &endpoint_id, payload)
                            .await
                        {
                            Ok(outcome) => {
                                tracing::info!(
                                    "Broadcast from '{}' to room '{}': delivered={}, pruned={}",
                                    endpoint_id.as_str(),
                                    room_id.as_str(),
                                    outcome.delivered,
                                    outcome.pruned
                                );
                                ServerMessage::BroadcastAck {
                                    delivered: outcome.delivered,
                                    pruned: outcome.pruned,
                                }
                            }
                            Err(BroadcastTimerError::NotAuthorized) => ServerMessage::Error {
                                code: ErrorCode::Forbidden,
                                message: "only a room creator may broadcast timer updates"
                                    .to_string(),
                            },
                            Err(BroadcastTimerError::EmptyPayload) => ServerMessage::Error {
                                code: ErrorCode::BadRequest,
                                message: BroadcastTimerError::EmptyPayload.to_string(),
                            },
                            Err(BroadcastTimerError::Storage(e)) => {
                                tracing::error!("Broadcast failed on storage: {}", e);
                                ServerMessage::Error {
                                    code: ErrorCode::Internal,
                                    message: "failed to read room connections".to_string(),
                                }
                            }
                        };

                        if reply(response).is_err() {
                            break;
                        }
                    }
                    Ok(ClientMessage::Join { .. }) => {
                        if reply(ServerMessage::Error {
                            code: ErrorCode::BadRequest,
                            message: "connection has already joined a room".to_string(),
                        })
                        .is_err()
                        {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Malformed frame from '{}': {}", endpoint_id.as_str(), e);
                        if reply(ServerMessage::Error {
                            code: ErrorCode::BadRequest,
                            message: format!("malformed message: {e}"),
                        })
                        .is_err()
                        {
                            break;
                        }
                    }
                }
            }
            Message::Ping(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                tracing::debug!("Received ping");
            }
            Message::Close(_) => {
                tracing::info!("Endpoint '{}' requested close", endpoint_id.as_str());
                break;
            }
            _ => {}
        }
    }
}
