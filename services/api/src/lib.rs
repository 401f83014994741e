//! MockVerse API Library Crate
//!
//! This library contains all the core logic for the MockVerse interview
//! service, including the application state, database access, REST handlers,
//! WebSocket session loop, and routing. The `api` binary is a thin wrapper
//! around this library.

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod ws;
