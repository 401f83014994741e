//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the database handle and the generation services.

use crate::config::Config;
use mockverse_core::{feedback::FeedbackSynthesizer, question::QuestionGenerator};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<crate::db::Db>,
    pub question_generator: Arc<QuestionGenerator>,
    pub feedback_synthesizer: Arc<FeedbackSynthesizer>,
    pub config: Arc<Config>,
}
