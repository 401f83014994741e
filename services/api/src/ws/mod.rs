//! WebSocket Session Management
//!
//! This module contains the core logic for handling interactive interview
//! sessions over WebSockets. It is structured into submodules for clarity:
//!
//! - `protocol`: Defines the JSON-based message format for client-server communication.
//! - `session`: Manages the WebSocket connection lifecycle, from attach to disconnect.
//! - `exchange`: Implements the answer/question exchange for one client message.

mod exchange;
pub mod protocol;
pub mod session;

pub use session::ws_handler;
