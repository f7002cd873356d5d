pub mod config;
pub mod feedback;
pub mod http;
pub mod interview;
pub mod questions;
pub mod store;

pub use config::Config;
pub use feedback::{AnswerFeedback, CompletionsApi, FeedbackService, OpenAiClient, StarFeedback};
pub use http::{create_router, AppState};
pub use interview::{AnswerRecord, AudioClip, InterviewFlow, Microphone, Phase, RecordState};
pub use questions::QuestionService;
pub use store::{InMemoryStore, MongoStore, Question, QuestionCategory, QuestionStore};
