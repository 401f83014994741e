//! API and Database Models
//!
//! This module defines the core data structures used for both database mapping
//! with `sqlx` and for generating OpenAPI documentation with `utoipa`.

use chrono::{DateTime, Utc};
use mockverse_core::transcript::{self, TranscriptLine};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Advisory lifecycle status of an interview session. Set to `started` at
/// creation; nothing in this core enforces transition legality.
#[derive(sqlx::Type, Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Started,
    Active,
    Completed,
}

/// Speaker tag of a turn. Sessions produced through the protocol strictly
/// alternate `ai, user, ai, ...` starting with `ai`.
#[derive(sqlx::Type, Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq)]
#[sqlx(rename_all = "lowercase")]
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

/// One interview session.
#[derive(Serialize, Deserialize, ToSchema, FromRow, Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub role: String,
    /// Empty string when no resume was provided or extraction failed.
    pub resume_text: String,
    #[schema(value_type = String, example = "started")]
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

/// One utterance within a session's transcript. Never mutated after creation.
#[derive(Serialize, Deserialize, ToSchema, FromRow, Debug, Clone)]
pub struct Turn {
    pub id: i64,
    pub session_id: i64,
    /// Per-session sequence number assigned at append time, starting at 1.
    /// The sole ordering mechanism; independent of wall-clock timestamps.
    pub seq: i64,
    #[schema(value_type = String, example = "ai")]
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// View of this turn as the domain-level transcript line the generators
    /// consume.
    pub fn to_line(&self) -> TranscriptLine {
        let speaker = match self.speaker {
            Speaker::Ai => transcript::Speaker::Ai,
            Speaker::User => transcript::Speaker::User,
        };
        TranscriptLine::new(speaker, self.text.clone())
    }
}

/// Response body of the create-interview operation.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct InterviewResponse {
    pub session_id: i64,
    pub first_question: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn session_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Started).unwrap(),
            "\"started\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn speaker_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&Speaker::Ai).unwrap(), "\"ai\"");
        let speaker: Speaker = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(speaker, Speaker::User);
    }

    #[test]
    fn speaker_display_matches_storage_tags() {
        assert_eq!(format!("{}", Speaker::Ai), "ai");
        assert_eq!(format!("{}", Speaker::User), "user");
    }

    #[test]
    fn session_serialization_round_trip() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap();
        let session = Session {
            id: 7,
            role: "Backend Engineer".to_string(),
            resume_text: String::new(),
            status: SessionStatus::Started,
            created_at,
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("Backend Engineer"));
        assert!(json.contains("\"started\""));

        let deserialized: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, session.id);
        assert_eq!(deserialized.role, session.role);
        assert_eq!(deserialized.status, session.status);
        assert_eq!(deserialized.created_at, created_at);
    }

    #[test]
    fn turn_to_line_maps_speaker_and_text() {
        let turn = Turn {
            id: 1,
            session_id: 7,
            seq: 2,
            speaker: Speaker::User,
            text: "I built a message queue.".to_string(),
            created_at: Utc::now(),
        };
        let line = turn.to_line();
        assert_eq!(line.speaker, transcript::Speaker::User);
        assert_eq!(line.text, "I built a message queue.");
    }

    #[test]
    fn interview_response_wire_shape() {
        let response = InterviewResponse {
            session_id: 1,
            first_question: "Tell me about yourself.".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            "{\"session_id\":1,\"first_question\":\"Tell me about yourself.\"}"
        );
    }

    #[test]
    fn error_response_serialization() {
        let error = ErrorResponse {
            message: "Session not found".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"message":"Session not found"}"#
        );
    }

    #[test]
    fn invalid_enum_values_fail_deserialization() {
        assert!(serde_json::from_str::<SessionStatus>("\"archived\"").is_err());
        assert!(serde_json::from_str::<Speaker>("\"assistant\"").is_err());
    }
}
