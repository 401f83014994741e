//! Speaker-tagged transcript lines and their prompt rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced an utterance within an interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Ai,
    User,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Ai => write!(f, "ai"),
            Speaker::User => write!(f, "user"),
        }
    }
}

/// One utterance of a session transcript, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptLine {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// Renders a transcript as alternating `speaker: text` lines, the form the
/// generation prompts expect.
pub fn render_transcript(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}: {}", line.speaker, line.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_display_matches_wire_tags() {
        assert_eq!(Speaker::Ai.to_string(), "ai");
        assert_eq!(Speaker::User.to_string(), "user");
    }

    #[test]
    fn speaker_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Speaker::Ai).unwrap(), "\"ai\"");
        assert_eq!(serde_json::to_string(&Speaker::User).unwrap(), "\"user\"");
    }

    #[test]
    fn render_joins_labeled_lines_in_order() {
        let lines = vec![
            TranscriptLine::new(Speaker::Ai, "Tell me about yourself."),
            TranscriptLine::new(Speaker::User, "I build message queues."),
            TranscriptLine::new(Speaker::Ai, "Which one are you proudest of?"),
        ];
        assert_eq!(
            render_transcript(&lines),
            "ai: Tell me about yourself.\nuser: I build message queues.\nai: Which one are you proudest of?"
        );
    }

    #[test]
    fn render_of_empty_transcript_is_empty() {
        assert_eq!(render_transcript(&[]), "");
    }
}
