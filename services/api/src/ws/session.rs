//! Manages the WebSocket connection lifecycle for an interview session.

use super::{
    exchange::{ExchangeError, run_answer_exchange},
    protocol::{ClientMessage, ServerMessage},
};
use crate::state::AppState;
use anyhow::Result;
use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Axum handler to upgrade an HTTP connection to a WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id))
}

/// Main handler for an individual WebSocket connection.
///
/// Verifies the session exists, then runs the sequential interview loop until
/// the client disconnects. Disconnection is the only way a session ends; it
/// performs no additional writes.
#[instrument(name = "interview_session", skip(socket, state))]
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, session_id: i64) {
    match state.db.get_interview(session_id).await {
        Ok(Some(_)) => info!("Interview channel attached"),
        Ok(None) => {
            warn!("Rejecting channel for unknown session");
            let _ = send_msg(
                &mut socket,
                ServerMessage::Error {
                    message: format!("No interview session with id '{session_id}'"),
                },
            )
            .await;
            return;
        }
        Err(e) => {
            error!(error = ?e, "Failed to look up session");
            return;
        }
    }

    if let Err(e) = run_interview_loop(&mut socket, &state, session_id).await {
        error!(error = ?e, "Interview session terminated with error");
    }
    info!("Interview channel closed");
}

/// The sequential event loop for an active interview session.
///
/// At most one client message is processed at a time; the loop suspends
/// indefinitely while waiting for the next one. A generation failure is
/// reported on the channel and the loop continues; a storage failure ends it.
async fn run_interview_loop(
    socket: &mut WebSocket,
    state: &Arc<AppState>,
    session_id: i64,
) -> Result<()> {
    while let Some(msg_result) = socket.recv().await {
        let ws_msg = match msg_result {
            Ok(msg) => msg,
            Err(e) => {
                info!(error = ?e, "Client connection dropped");
                break;
            }
        };

        match ws_msg {
            Message::Text(text) => {
                let msg = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!(error = %e, "Ignoring malformed client message");
                        continue;
                    }
                };
                let ClientMessage::Answer { text } = msg;

                match run_answer_exchange(state, session_id, &text).await {
                    Ok(question) => {
                        send_msg(socket, ServerMessage::Question { text: question }).await?;
                    }
                    Err(ExchangeError::Generation(e)) => {
                        error!(error = %e, "Follow-up generation failed");
                        send_msg(
                            socket,
                            ServerMessage::Error {
                                message: "Could not generate the next question. Your answer was saved; please try again.".to_string(),
                            },
                        )
                        .await?;
                    }
                    Err(ExchangeError::Storage(e)) => return Err(e),
                }
            }
            Message::Close(_) => {
                info!("Client sent close frame. Shutting down session.");
                break;
            }
            Message::Binary(_) => warn!("Ignoring unexpected binary frame"),
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
    Ok(())
}

/// A helper function to serialize and send a `ServerMessage` to the client.
async fn send_msg(socket: &mut WebSocket, msg: ServerMessage) -> Result<()> {
    let serialized = serde_json::to_string(&msg)?;
    socket.send(Message::Text(serialized.into())).await?;
    Ok(())
}
