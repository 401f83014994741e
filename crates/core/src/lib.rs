//! MockVerse Core Library
//!
//! This crate contains the interview domain logic that is independent of any
//! web framework or storage engine: the text-generation client abstraction,
//! question generation, feedback synthesis, transcript rendering, and resume
//! text extraction. The `mockverse-api` service composes these pieces into
//! the HTTP/WebSocket surface.

pub mod feedback;
pub mod llm_client;
pub mod question;
pub mod resume;
pub mod transcript;
