use super::mic::AudioClip;
use crate::feedback::AnswerFeedback;
use crate::store::{Question, QuestionCategory};
use anyhow::{anyhow, Context, Result};
use reqwest::multipart;

/// HTTP client for the interview API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn categories(&self) -> Result<Vec<QuestionCategory>> {
        let response = self
            .http
            .get(format!("{}/questions-categories", self.base_url))
            .send()
            .await
            .context("Failed to fetch question categories")?;

        Self::check(&response)?;

        Ok(response
            .json()
            .await
            .context("Failed to parse question categories")?)
    }

    pub async fn interview_questions(&self, category_ids: &[String]) -> Result<Vec<Question>> {
        let mut request = self
            .http
            .get(format!("{}/questions-interview", self.base_url));

        if !category_ids.is_empty() {
            request = request.query(&[("categories", category_ids.join(","))]);
        }

        let response = request
            .send()
            .await
            .context("Failed to fetch interview questions")?;

        Self::check(&response)?;

        Ok(response
            .json()
            .await
            .context("Failed to parse interview questions")?)
    }

    pub async fn request_feedback(
        &self,
        question_id: &str,
        clip: &AudioClip,
    ) -> Result<AnswerFeedback> {
        let audio = multipart::Part::bytes(clip.bytes.clone())
            .file_name("answer.wav")
            .mime_str(&clip.mime)
            .context("Failed to build answer upload")?;

        let form = multipart::Form::new()
            .text("questionId", question_id.to_string())
            .part("audio", audio);

        let response = self
            .http
            .post(format!("{}/feedback", self.base_url))
            .multipart(form)
            .send()
            .await
            .context("Failed to request feedback")?;

        Self::check(&response)?;

        Ok(response.json().await.context("Failed to parse feedback")?)
    }

    fn check(response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(anyhow!("Server replied {}", status))
        }
    }
}
