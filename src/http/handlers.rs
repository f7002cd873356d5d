use super::state::AppState;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct InterviewQuery {
    /// Comma-separated category ids; absent or empty means the whole bank
    pub categories: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Fields accepted in the `POST /feedback` multipart body
#[derive(Debug, Default)]
struct FeedbackUpload {
    audio: Option<Vec<u8>>,
    question_id: Option<String>,
    question: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /questions-categories
/// All category reference documents
pub async fn get_question_categories(State(state): State<AppState>) -> impl IntoResponse {
    match state.questions.categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => {
            error!("Failed to load question categories: {:#}", e);
            internal_error()
        }
    }
}

/// GET /questions-interview?categories=a,b
/// A category-balanced random question set for one practice session
pub async fn get_interview_questions(
    State(state): State<AppState>,
    Query(query): Query<InterviewQuery>,
) -> impl IntoResponse {
    let category_ids: Vec<String> = query
        .categories
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    match state.questions.interview_set(&category_ids).await {
        Ok(questions) => (StatusCode::OK, Json(questions)).into_response(),
        Err(e) => {
            error!("Failed to sample interview questions: {:#}", e);
            internal_error()
        }
    }
}

/// POST /feedback
/// Multipart body: `audio` (required) plus `questionId` or raw `question`.
/// Returns the STAR feedback for the uploaded answer.
pub async fn post_feedback(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut upload = FeedbackUpload::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed feedback upload: {}", e);
                return bad_request("malformed multipart body");
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => match field.bytes().await {
                Ok(bytes) => upload.audio = Some(bytes.to_vec()),
                Err(e) => {
                    warn!("Failed to read audio part: {}", e);
                    return bad_request("unreadable audio part");
                }
            },
            "questionId" => match field.text().await {
                Ok(text) => upload.question_id = Some(text),
                Err(_) => return bad_request("unreadable questionId part"),
            },
            "question" => match field.text().await {
                Ok(text) => upload.question = Some(text),
                Err(_) => return bad_request("unreadable question part"),
            },
            _ => {
                warn!("Ignoring unexpected feedback field: {}", name);
            }
        }
    }

    let Some(audio) = upload.audio else {
        return bad_request("missing audio file");
    };
    if audio.is_empty() {
        return bad_request("empty audio file");
    }

    // Resolve the question text: by store id when given, raw text otherwise
    let (question_id, question_text) = match (upload.question_id, upload.question) {
        (Some(id), _) => {
            let question = match state.questions.question_by_id(&id).await {
                Ok(question) => question,
                Err(e) => {
                    error!("Failed to look question {} up: {:#}", id, e);
                    return internal_error();
                }
            };
            match question {
                Some(question) => (Some(id), question.text),
                None => {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(ErrorResponse {
                            error: format!("unknown question id {}", id),
                        }),
                    )
                        .into_response();
                }
            }
        }
        (None, Some(text)) => (None, text),
        (None, None) => return bad_request("missing questionId or question"),
    };

    match state
        .feedback
        .review_answer(audio, question_id, &question_text)
        .await
    {
        Ok(feedback) => (StatusCode::OK, Json(feedback)).into_response(),
        Err(e) => {
            error!("Failed to grade answer: {:#}", e);
            internal_error()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Error helpers
// ============================================================================

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}
