// Integration tests for the feedback service
//
// The model API is a scripted fake so the orchestration (transcribe, review,
// parse) can be exercised without the network.

use anyhow::Result;
use interview_coach::feedback::{CompletionsApi, FeedbackService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const STAR_REPLY: &str = r#"{
    "feedback": {
        "situation": {"good": "Clear setting", "improvement": "Name the company"},
        "task": {"good": "Your role was explicit", "improvement": ""},
        "action": {"good": "", "improvement": "Use more 'I' statements"},
        "result": {"good": "Quantified outcome", "improvement": ""}
    }
}"#;

struct FakeApi {
    reply: String,
    transcribe_calls: AtomicUsize,
    complete_calls: AtomicUsize,
}

impl FakeApi {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            transcribe_calls: AtomicUsize::new(0),
            complete_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl CompletionsApi for FakeApi {
    async fn transcribe(&self, _audio: Vec<u8>, _file_name: &str) -> Result<String> {
        self.transcribe_calls.fetch_add(1, Ordering::SeqCst);
        Ok("I led the migration and we shipped a week early".to_string())
    }

    async fn complete(&self, _system: &str, user: &str) -> Result<String> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        assert!(user.contains("<answer>"), "transcript goes in the prompt");
        assert!(user.contains("<question>"), "question goes in the prompt");
        Ok(self.reply.clone())
    }
}

#[tokio::test]
async fn test_review_answer_returns_parsed_star_feedback() -> Result<()> {
    let service = FeedbackService::new(Arc::new(FakeApi::new(STAR_REPLY)));

    let feedback = service
        .review_answer(
            vec![0u8; 64],
            Some("q1".to_string()),
            "Tell me about a challenge",
        )
        .await?;

    assert_eq!(feedback.question_id.as_deref(), Some("q1"));
    assert_eq!(feedback.star_feedback.situation.good, "Clear setting");
    assert_eq!(
        feedback.star_feedback.action.improvement,
        "Use more 'I' statements"
    );
    assert_eq!(feedback.star_feedback.result.good, "Quantified outcome");

    Ok(())
}

#[tokio::test]
async fn test_repeated_requests_stay_independent() -> Result<()> {
    let api = Arc::new(FakeApi::new(STAR_REPLY));
    let service = FeedbackService::new(api.clone());

    for _ in 0..2 {
        service
            .review_answer(vec![0u8; 64], Some("q1".to_string()), "Same question")
            .await?;
    }

    // No memoization: the same (audio, question) pair hits the API twice
    assert_eq!(api.transcribe_calls.load(Ordering::SeqCst), 2);
    assert_eq!(api.complete_calls.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn test_fenced_reply_still_parses() -> Result<()> {
    let fenced = format!("```json\n{}\n```", STAR_REPLY);
    let service = FeedbackService::new(Arc::new(FakeApi::new(&fenced)));

    let feedback = service
        .review_answer(vec![0u8; 64], None, "Tell me about a challenge")
        .await?;

    assert_eq!(feedback.question_id, None);
    assert_eq!(feedback.star_feedback.situation.good, "Clear setting");

    Ok(())
}

#[tokio::test]
async fn test_prose_reply_is_an_error() {
    let service = FeedbackService::new(Arc::new(FakeApi::new(
        "Sure! Overall this was a strong answer with room to grow.",
    )));

    let result = service
        .review_answer(vec![0u8; 64], None, "Tell me about a challenge")
        .await;

    assert!(result.is_err(), "non-JSON replies must fail the request");
}

#[tokio::test]
async fn test_incomplete_star_reply_is_an_error() {
    // Only one of the four components - not the agreed shape
    let service = FeedbackService::new(Arc::new(FakeApi::new(
        r#"{"feedback": {"situation": {"good": "ok", "improvement": ""}}}"#,
    )));

    let result = service
        .review_answer(vec![0u8; 64], None, "Tell me about a challenge")
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_component_fields_default_to_empty() -> Result<()> {
    let sparse = r#"{
        "feedback": {
            "situation": {"good": "Clear setting"},
            "task": {},
            "action": {"improvement": "Slow down"},
            "result": {}
        }
    }"#;
    let service = FeedbackService::new(Arc::new(FakeApi::new(sparse)));

    let feedback = service
        .review_answer(vec![0u8; 64], None, "Tell me about a challenge")
        .await?;

    assert_eq!(feedback.star_feedback.situation.improvement, "");
    assert_eq!(feedback.star_feedback.task.good, "");
    assert_eq!(feedback.star_feedback.action.improvement, "Slow down");

    Ok(())
}
