use super::openai::OpenAiClient;
use super::star::{self, AnswerFeedback};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

const REVIEW_INSTRUCTION: &str = "\
You are an expert in assessment and advice for behavioral interviews. \
The user will provide you with a question and an answer delimited with XML tags. \
Reply with a JSON object with a 'feedback' root property holding exactly the four \
S.T.A.R. components 'situation', 'task', 'action' and 'result'. For each component, \
put any good elements of the answer in the 'good' property and what can be improved \
in the 'improvement' property. Reply with the JSON object only.";

/// The two model capabilities the feedback service consumes.
///
/// `OpenAiClient` implements it in production; tests substitute a scripted
/// fake to observe calls and feed canned replies.
#[async_trait::async_trait]
pub trait CompletionsApi: Send + Sync {
    /// Speech-to-text on an uploaded clip, returning the plain transcript
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String>;

    /// One-shot chat completion, returning the raw reply text
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[async_trait::async_trait]
impl CompletionsApi for OpenAiClient {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String> {
        OpenAiClient::transcribe(self, audio, file_name).await
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        OpenAiClient::chat(self, system, user).await
    }
}

/// Grades one spoken answer: transcribe, review, parse.
///
/// Deliberately stateless - every call makes its own pair of model calls,
/// so identical requests stay independent.
pub struct FeedbackService {
    api: Arc<dyn CompletionsApi>,
}

impl FeedbackService {
    pub fn new(api: Arc<dyn CompletionsApi>) -> Self {
        Self { api }
    }

    pub async fn review_answer(
        &self,
        audio: Vec<u8>,
        question_id: Option<String>,
        question_text: &str,
    ) -> Result<AnswerFeedback> {
        let transcript = self
            .api
            .transcribe(audio, "answer.wav")
            .await
            .context("Failed to transcribe the answer")?;

        let user_message = format!(
            "Give me a feedback on my answer <answer>{}</answer> to this question <question>{}</question>",
            transcript, question_text
        );

        let reply = self
            .api
            .complete(REVIEW_INSTRUCTION, &user_message)
            .await
            .context("Failed to review the answer")?;

        let star_feedback = star::parse_star_reply(&reply)?;

        info!("Reviewed answer for question: {}", question_text);

        Ok(AnswerFeedback {
            question_id,
            star_feedback,
        })
    }
}
