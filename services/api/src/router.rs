//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API, WebSocket endpoint, and OpenAPI documentation.

use crate::{
    handlers,
    models::{ErrorResponse, InterviewResponse, Session, SessionStatus, Speaker, Turn},
    state::AppState,
    ws::ws_handler,
};

use axum::{
    Router,
    routing::{get, post},
};
use mockverse_core::feedback::Feedback;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::create_interview,
        handlers::get_feedback,
    ),
    components(
        schemas(
            InterviewResponse,
            ErrorResponse,
            Feedback,
            Session,
            Turn,
            SessionStatus,
            Speaker,
            handlers::CreateInterviewForm
        )
    ),
    tags(
        (name = "MockVerse API", description = "Mock interview sessions with AI-generated questions and feedback")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/", get(handlers::health))
        .route("/api/v1/interviews", post(handlers::create_interview))
        .route(
            "/api/v1/interviews/{session_id}/feedback",
            get(handlers::get_feedback),
        )
        .route("/ws/interviews/{session_id}", get(ws_handler))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
