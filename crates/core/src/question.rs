//! Interview Question Generation
//!
//! Maps a target role (plus optional resume text) to an opening question, and
//! an ordered transcript to a follow-up question. Both operations build a
//! single prompt from a template and return the external capability's
//! completion verbatim, with no post-processing or length limits.

use crate::llm_client::{GenerationError, TextGenerator};
use crate::transcript::{TranscriptLine, render_transcript};
use std::collections::HashMap;
use std::sync::Arc;

const OPENING_TEMPLATE: &str = "opening_question";
const FOLLOW_UP_TEMPLATE: &str = "follow_up_question";

/// Stateless question generator over an injected text-generation capability.
pub struct QuestionGenerator {
    generator: Arc<dyn TextGenerator>,
    prompts: HashMap<String, String>,
}

impl QuestionGenerator {
    /// Creates a new generator.
    ///
    /// `prompts` must contain the `opening_question` and `follow_up_question`
    /// templates; a missing template surfaces as a `GenerationError` at call
    /// time rather than at construction.
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: HashMap<String, String>) -> Self {
        Self { generator, prompts }
    }

    fn template(&self, key: &'static str) -> Result<&str, GenerationError> {
        self.prompts
            .get(key)
            .map(String::as_str)
            .ok_or(GenerationError::MissingTemplate(key))
    }

    /// Generates the opening question of a screening interview for `role`.
    ///
    /// The resume text is appended verbatim as contextual material only when
    /// non-empty; an empty resume is a valid, common case.
    pub async fn opening(
        &self,
        role: &str,
        resume_text: &str,
    ) -> Result<String, GenerationError> {
        let mut prompt = self.template(OPENING_TEMPLATE)?.replace("{role}", role);
        if !resume_text.is_empty() {
            prompt.push_str(&format!(
                "\n\nThe candidate has submitted the following resume. Use it to inform your first question:\n---RESUME---\n{resume_text}\n---END RESUME---"
            ));
        }
        self.generator.generate(&prompt).await
    }

    /// Generates the next interviewer question from the conversation so far.
    ///
    /// The transcript is rendered as labeled `speaker: text` lines in
    /// chronological order; the template ends with an `Interviewer:` cue so
    /// the model produces the interviewer's next line.
    pub async fn follow_up(
        &self,
        transcript: &[TranscriptLine],
    ) -> Result<String, GenerationError> {
        let prompt = self
            .template(FOLLOW_UP_TEMPLATE)?
            .replace("{transcript}", &render_transcript(transcript));
        self.generator.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::MockTextGenerator;
    use crate::transcript::Speaker;

    fn test_prompts() -> HashMap<String, String> {
        HashMap::from([
            (
                "opening_question".to_string(),
                "Interview for a '{role}' position.".to_string(),
            ),
            (
                "follow_up_question".to_string(),
                "Conversation so far:\n\n{transcript}\n\nInterviewer:".to_string(),
            ),
        ])
    }

    #[tokio::test]
    async fn opening_interpolates_role_and_returns_completion_verbatim() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt: &str| {
                prompt == "Interview for a 'Backend Engineer' position."
            })
            .returning(|_| {
                Ok("Tell me about your experience with distributed systems.".to_string())
            });

        let questions = QuestionGenerator::new(Arc::new(generator), test_prompts());
        let question = questions.opening("Backend Engineer", "").await.unwrap();
        assert_eq!(
            question,
            "Tell me about your experience with distributed systems."
        );
    }

    #[tokio::test]
    async fn opening_appends_resume_block_only_when_present() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt: &str| {
                prompt.contains("---RESUME---")
                    && prompt.contains("Rust, five years")
                    && prompt.contains("---END RESUME---")
            })
            .returning(|_| Ok("First question.".to_string()));

        let questions = QuestionGenerator::new(Arc::new(generator), test_prompts());
        questions
            .opening("Designer", "Rust, five years")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn follow_up_renders_transcript_with_interviewer_cue() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt: &str| {
                prompt.contains("ai: How are you?\nuser: Fine.")
                    && prompt.ends_with("Interviewer:")
            })
            .returning(|_| Ok("And what brings you here?".to_string()));

        let questions = QuestionGenerator::new(Arc::new(generator), test_prompts());
        let transcript = vec![
            TranscriptLine::new(Speaker::Ai, "How are you?"),
            TranscriptLine::new(Speaker::User, "Fine."),
        ];
        let question = questions.follow_up(&transcript).await.unwrap();
        assert_eq!(question, "And what brings you here?");
    }

    #[tokio::test]
    async fn upstream_failure_propagates_untouched() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(GenerationError::EmptyCompletion));

        let questions = QuestionGenerator::new(Arc::new(generator), test_prompts());
        let err = questions.opening("Backend Engineer", "").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyCompletion));
    }

    #[tokio::test]
    async fn missing_template_is_reported_by_name() {
        let questions =
            QuestionGenerator::new(Arc::new(MockTextGenerator::new()), HashMap::new());
        let err = questions.opening("Backend Engineer", "").await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::MissingTemplate("opening_question")
        ));
    }
}
