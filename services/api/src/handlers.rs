//! Axum Handlers for the REST API
//!
//! This module contains the create-interview and feedback operations and the
//! error type that maps the domain failure taxonomy onto HTTP responses. It
//! uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mockverse_core::{
    feedback::{Feedback, FeedbackError},
    llm_client::GenerationError,
    resume,
    transcript::TranscriptLine,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::{
    models::{ErrorResponse, InterviewResponse, Turn},
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// The external generation capability was unreachable or returned an
    /// empty/error result.
    Upstream(String),
    /// The external generation capability answered, but not in the required
    /// structured shape. Reported separately from `Upstream` so operators can
    /// tell "model unreachable" from "model misbehaved".
    MalformedCompletion(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Upstream(detail) => {
                error!("Generation backend failure: {detail}");
                let message = "The question generation service is unavailable.".to_string();
                (StatusCode::BAD_GATEWAY, Json(ErrorResponse { message })).into_response()
            }
            ApiError::MalformedCompletion(detail) => {
                error!("Generation backend returned a malformed payload: {detail}");
                let message =
                    "The feedback service returned an unusable response.".to_string();
                (StatusCode::BAD_GATEWAY, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

impl ApiError {
    pub(crate) fn from_generation(err: GenerationError) -> Self {
        ApiError::Upstream(err.to_string())
    }

    pub(crate) fn from_feedback(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Generation(e) => ApiError::Upstream(e.to_string()),
            FeedbackError::Format(_) | FeedbackError::ScoreOutOfRange(_) => {
                ApiError::MalformedCompletion(err.to_string())
            }
        }
    }
}

/// Multipart form for creating an interview session.
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct CreateInterviewForm {
    /// Target job role, required and non-empty.
    role: String,
    /// Optional resume document (PDF, Word, or plain text).
    #[schema(value_type = Option<String>, format = Binary)]
    resume_file: Option<Vec<u8>>,
}

/// Create a new interview session and return its opening question.
///
/// Resume parsing is best-effort: an unsupported or unreadable document
/// degrades to an empty resume and the interview is created regardless.
#[utoipa::path(
    post,
    path = "/api/v1/interviews",
    request_body(content = CreateInterviewForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Interview created", body = InterviewResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 502, description = "Generation backend unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_interview(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut role: Option<String> = None;
    let mut resume_file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("role") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid `role` field: {e}")))?;
                role = Some(value);
            }
            Some("resumeFile") => {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Invalid `resumeFile` field: {e}"))
                })?;
                resume_file = Some((bytes.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let role = role
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("`role` form field is required".to_string()))?;

    let resume_text = match resume_file {
        Some((bytes, content_type)) => match resume::extract(&bytes, &content_type) {
            Ok(text) => text,
            Err(e) => {
                // Never block interview creation on a bad resume.
                warn!(error = %e, "Resume extraction failed; continuing with empty resume text");
                String::new()
            }
        },
        None => String::new(),
    };

    let first_question = state
        .question_generator
        .opening(&role, &resume_text)
        .await
        .map_err(ApiError::from_generation)?;

    // Persisted only after generation succeeded, so a session row never
    // exists without its opening turn.
    let (session, _opening_turn) = state
        .db
        .create_interview(&role, &resume_text, &first_question)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InterviewResponse {
            session_id: session.id,
            first_question,
        }),
    ))
}

/// Produce structured feedback for an interview session's transcript.
///
/// Recomputed from the external model on every request; nothing is cached.
#[utoipa::path(
    get,
    path = "/api/v1/interviews/{session_id}/feedback",
    responses(
        (status = 200, description = "Structured feedback", body = Feedback),
        (status = 404, description = "No such session", body = ErrorResponse),
        (status = 502, description = "Generation backend unavailable or non-compliant", body = ErrorResponse)
    ),
    params(
        ("session_id" = i64, Path, description = "Interview session ID")
    )
)]
pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<i64>,
) -> Result<Json<Feedback>, ApiError> {
    let turns = state.db.transcript(session_id).await?;
    if turns.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No interview session with id '{session_id}'"
        )));
    }

    let transcript: Vec<TranscriptLine> = turns.iter().map(Turn::to_line).collect();
    let feedback = state
        .feedback_synthesizer
        .synthesize(&transcript)
        .await
        .map_err(ApiError::from_feedback)?;

    Ok(Json(feedback))
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "MockVerse API is running" }))
}
