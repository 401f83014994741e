//! Interview Feedback Synthesis
//!
//! Turns a full session transcript into a structured feedback record with one
//! generation request. The external capability is instructed to answer with a
//! bare JSON object; its output is treated as untrusted text, normalized by
//! stripping markdown code fences, and then parsed strictly. No retry and no
//! semantic repair beyond the fence strip.

use crate::llm_client::{GenerationError, TextGenerator};
use crate::transcript::{TranscriptLine, render_transcript};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

const FEEDBACK_TEMPLATE: &str = "feedback";

/// Structured feedback for a completed (or in-progress) interview.
///
/// Transient: recomputed from the transcript on every request, never stored.
/// Field names follow the frontend contract, hence the camelCase wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub overall_summary: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    #[schema(minimum = 0, maximum = 10)]
    pub score: u8,
}

/// Failure modes of feedback synthesis.
///
/// `Generation` means the backend was unreachable or empty-handed;
/// `Format`/`ScoreOutOfRange` mean it answered but did not comply with the
/// requested shape. Callers report the two classes differently.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("feedback payload was not the required JSON shape: {0}")]
    Format(#[source] serde_json::Error),
    #[error("feedback score {0} is outside the 0-10 range")]
    ScoreOutOfRange(u8),
}

/// Stateless feedback synthesizer over an injected text-generation capability.
pub struct FeedbackSynthesizer {
    generator: Arc<dyn TextGenerator>,
    prompts: HashMap<String, String>,
}

impl FeedbackSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: HashMap<String, String>) -> Self {
        Self { generator, prompts }
    }

    /// Synthesizes a feedback record from the ordered transcript.
    pub async fn synthesize(
        &self,
        transcript: &[TranscriptLine],
    ) -> Result<Feedback, FeedbackError> {
        let template = self
            .prompts
            .get(FEEDBACK_TEMPLATE)
            .ok_or(GenerationError::MissingTemplate(FEEDBACK_TEMPLATE))?;
        let prompt = template.replace("{transcript}", &render_transcript(transcript));

        let raw = self.generator.generate(&prompt).await?;
        let payload = strip_json_fences(&raw);

        let feedback: Feedback =
            serde_json::from_str(payload).map_err(FeedbackError::Format)?;
        if feedback.score > 10 {
            return Err(FeedbackError::ScoreOutOfRange(feedback.score));
        }
        Ok(feedback)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
