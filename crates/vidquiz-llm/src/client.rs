//! Chat completion HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{LlmError, LlmResult};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A text-generation backend that turns a system/user prompt pair into text.
///
/// The API server holds this as a trait object so handlers can be exercised
/// with a substitute implementation.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Run a single completion and return the raw text of the first choice.
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Configuration for the chat client.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    /// Bearer API key
    pub api_key: String,
    /// Base URL, without the trailing `/chat/completions`
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl ChatClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create config from environment variables.
    pub fn from_env() -> LlmResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::config("OPENAI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL")
                .ok()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("OPENAI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("OPENAI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }

    /// Full completions endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Client for an OpenAI-compatible chat completion API.
pub struct ChatClient {
    http: Client,
    config: ChatClientConfig,
}

impl ChatClient {
    /// Create a new chat client.
    pub fn new(config: ChatClientConfig) -> LlmResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> LlmResult<Self> {
        Self::new(ChatClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ChatClientConfig {
        &self.config
    }

    /// Send a chat request and return the decoded envelope.
    pub async fn chat(&self, request: &ChatRequest) -> LlmResult<ChatResponse> {
        let url = self.config.completions_url();
        debug!(url = %url, model = %request.model, "Sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::request_failed(format!(
                "Chat completion API returned {}: {}",
                status, body
            )));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::invalid_response(format!("Failed to parse completion: {}", e)))
    }
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self.chat(&request).await?;
        let content = response
            .first_content()
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        info!(
            model = %self.config.model,
            chars = content.len(),
            "Chat completion received"
        );
        Ok(content.to_string())
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
