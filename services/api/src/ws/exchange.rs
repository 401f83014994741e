//! Contains the logic for a single answer/question exchange.

use crate::{models::Speaker, models::Turn, state::AppState};
use mockverse_core::{llm_client::GenerationError, transcript::TranscriptLine};

/// Failure modes of one exchange, split by consequence: a generation failure
/// is fatal for the triggering request only, a storage failure ends the
/// session loop.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("transcript store failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Handles a single client answer, driving one full exchange:
///
/// 1. Durably append the `user` turn.
/// 2. Read the full ordered transcript (which observes that turn).
/// 3. Request the follow-up question from the generation capability.
/// 4. Append the resulting `ai` turn and return its text.
///
/// If generation fails after step 1, the user turn stays persisted — the
/// conversation history is never silently lost.
pub async fn run_answer_exchange(
    state: &AppState,
    session_id: i64,
    user_text: &str,
) -> Result<String, ExchangeError> {
    state
        .db
        .append_turn(session_id, Speaker::User, user_text)
        .await?;

    let turns = state.db.transcript(session_id).await?;
    let transcript: Vec<TranscriptLine> = turns.iter().map(Turn::to_line).collect();

    let question = state.question_generator.follow_up(&transcript).await?;

    state
        .db
        .append_turn(session_id, Speaker::Ai, &question)
        .await?;

    Ok(question)
}
