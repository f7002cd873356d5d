//! Answer feedback
//!
//! Orchestrates the two model calls behind grading a spoken answer:
//! transcription of the audio clip, then a chat completion that reviews the
//! transcript against the question and returns STAR-structured feedback.

mod openai;
mod service;
mod star;

pub use openai::OpenAiClient;
pub use service::{CompletionsApi, FeedbackService};
pub use star::{AnswerFeedback, FeedbackComponent, StarFeedback};
