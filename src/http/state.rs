use crate::feedback::FeedbackService;
use crate::questions::QuestionService;
use std::sync::Arc;

/// Shared application state for HTTP handlers.
///
/// Both services are built once at startup and threaded into every handler;
/// nothing here is mutable across requests.
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionService>,
    pub feedback: Arc<FeedbackService>,
}

impl AppState {
    pub fn new(questions: QuestionService, feedback: FeedbackService) -> Self {
        Self {
            questions: Arc::new(questions),
            feedback: Arc::new(feedback),
        }
    }
}
