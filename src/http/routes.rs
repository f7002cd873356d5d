use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Uploaded answers are whole spoken clips; 25 MB matches the
/// transcription API's own file limit.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Question bank
        .route(
            "/questions-categories",
            get(handlers::get_question_categories),
        )
        .route(
            "/questions-interview",
            get(handlers::get_interview_questions),
        )
        // Answer grading
        .route("/feedback", post(handlers::post_feedback))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // The browser client is served from a different origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
