//! Defines the WebSocket message protocol between the browser client and the API server.

use serde::{Deserialize, Serialize};

/// Messages sent from the client (browser) to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The candidate's answer to the interviewer's last question.
    Answer { text: String },
}

/// Messages sent from the server to the client (browser).
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The interviewer's next question.
    Question { text: String },
    /// Reports a failure for the triggering request. The session stays open.
    Error { message: String },
}
