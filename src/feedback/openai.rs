use crate::config::OpenAiConfig;
use anyhow::{anyhow, Context, Result};
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Thin client for the OpenAI transcription and chat endpoints
pub struct OpenAiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    transcription_model: String,
    chat_model: String,
    language: String,
}

impl OpenAiClient {
    pub fn new(cfg: &OpenAiConfig) -> Result<Self> {
        if cfg.api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY is not set");
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            transcription_model: cfg.transcription_model.clone(),
            chat_model: cfg.chat_model.clone(),
            language: cfg.language.clone(),
        })
    }

    pub(crate) async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String> {
        let file = multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .context("Failed to build audio upload part")?;

        let form = multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .text("language", self.language.clone())
            .part("file", file);

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.api_base))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Transcription request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Transcription API error ({}): {}", status, body));
        }

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .context("Failed to parse transcription response")?;

        info!(
            "Transcribed answer: {} characters",
            transcription.text.len()
        );

        Ok(transcription.text)
    }

    pub(crate) async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Chat completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Chat API error ({}): {}", status, body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat response")?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("Chat reply contained no choices"))
    }
}
