use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One graded STAR component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackComponent {
    /// What the answer already did well
    #[serde(default)]
    pub good: String,

    /// What would strengthen it
    #[serde(default)]
    pub improvement: String,
}

/// The four fixed components of a graded behavioral answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarFeedback {
    pub situation: FeedbackComponent,
    pub task: FeedbackComponent,
    pub action: FeedbackComponent,
    pub result: FeedbackComponent,
}

/// Feedback for one answered question, as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    /// Store id of the graded question; null when the caller sent raw text
    pub question_id: Option<String>,
    pub star_feedback: StarFeedback,
}

/// Shape the model is instructed to reply with
#[derive(Debug, Deserialize)]
pub(crate) struct FeedbackEnvelope {
    pub feedback: StarFeedback,
}

/// Parse the model's reply into the fixed STAR shape.
///
/// Models wrap JSON in markdown fences often enough that we strip one
/// surrounding fence before parsing; anything else malformed is an error.
pub(crate) fn parse_star_reply(raw: &str) -> Result<StarFeedback> {
    let body = strip_code_fence(raw.trim());

    let envelope: FeedbackEnvelope =
        serde_json::from_str(body).context("Model reply was not valid feedback JSON")?;

    Ok(envelope.feedback)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string ("json") on the opening fence line
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };

    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
