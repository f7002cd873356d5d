use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub store: StoreConfig,
    pub openai: OpenAiConfig,
    pub interview: InterviewConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub database: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiConfig {
    pub api_base: String,
    /// Comes from OPENAI_API_KEY, never from the config file
    #[serde(default)]
    pub api_key: String,
    pub transcription_model: String,
    pub chat_model: String,
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewConfig {
    pub questions_per_session: usize,
    /// Base URL the practice client talks to
    pub server_url: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .set_override_option("openai.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
