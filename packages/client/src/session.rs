//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use sunadokei_server::infrastructure::dto::websocket::{
    ClientMessage, ServerMessage, TimerStateDto,
};
use sunadokei_shared::time::now_epoch_millis;

use crate::{
    domain::{apply_command, parse_command},
    error::ClientError,
    formatter::TimerFormatter,
    ui::redisplay_prompt,
};

/// Run the WebSocket client session
///
/// Joins the room and renders incoming frames. In creator mode a readline
/// thread additionally feeds timer commands into the write task.
pub async fn run_client_session(
    url: &str,
    room_id: &str,
    session_id: &str,
    is_creator: bool,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let (mut write, mut read) = ws_stream.split();

    // The first frame of a connection must be the typed join message
    let join = ClientMessage::Join {
        room_id: room_id.to_string(),
        session_id: session_id.to_string(),
        is_creator,
    };
    let join_json = serde_json::to_string(&join)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(join_json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to timer sync server");
    if is_creator {
        println!(
            "\nYou are a creator of room '{}'. Commands: start <minutes>, pause, resume. Press Ctrl+C to exit.\n",
            room_id
        );
    } else {
        println!(
            "\nWatching room '{}'. Timer updates will appear below. Press Ctrl+C to exit.\n",
            room_id
        );
    }

    // Last timer state seen or sent, shared between the read and write tasks
    // so pause/resume keeps working when another creator moves the timer
    let last_state = Arc::new(Mutex::new(None::<TimerStateDto>));

    let session_id_for_read = session_id.to_string();
    let last_state_for_read = last_state.clone();

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(ServerMessage::Joined { room_id, joined_at }) => {
                            print!("{}", TimerFormatter::format_joined(&room_id, joined_at));
                        }
                        Ok(ServerMessage::TimerUpdate { timer_state }) => {
                            print!("{}", TimerFormatter::format_timer_update(&timer_state));
                            *last_state_for_read.lock().await = Some(timer_state);
                        }
                        Ok(ServerMessage::BroadcastAck { delivered, pruned }) => {
                            print!("{}", TimerFormatter::format_broadcast_ack(delivered, pruned));
                        }
                        Ok(ServerMessage::Error { code, message }) => {
                            print!("{}", TimerFormatter::format_server_error(code, &message));
                        }
                        // If parsing fails, display as raw text
                        Err(_) => {
                            print!("{}", TimerFormatter::format_raw_message(&text));
                        }
                    }
                    redisplay_prompt(&session_id_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    if !is_creator {
        // Watchers have no input loop; stay until the server goes away
        let connection_error = read_task.await.unwrap_or(true);
        if connection_error {
            return Err(ClientError::ConnectionError("Connection lost".to_string()));
        }
        return Ok(());
    }

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_label = session_id.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_label);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn commands into timer broadcasts
    let room_id_for_write = room_id.to_string();
    let session_id_for_write = session_id.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e);
                    redisplay_prompt(&session_id_for_write);
                    continue;
                }
            };

            let next_state = {
                let current = last_state.lock().await;
                match apply_command(command, current.as_ref(), now_epoch_millis()) {
                    Ok(state) => state,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(&session_id_for_write);
                        continue;
                    }
                }
            };

            let frame = ClientMessage::TimerBroadcast {
                room_id: room_id_for_write.clone(),
                timer_state: next_state.clone(),
            };
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize timer broadcast: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send timer broadcast: {}", e);
                write_error = true;
                break;
            }

            *last_state.lock().await = Some(next_state);
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}
