//! Groq chat-completions provider (OpenAI-compatible wire format).

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use easel_core::conversation::ConversationState;
use easel_core::error::{EaselError, EaselResult};
use easel_core::traits::{Completion, CompletionConfig};
use easel_core::types::Turn;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

/// Groq completion provider.
pub struct GroqCompletion {
    client: Client,
    config: CompletionConfig,
    api_key: SecretString,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

impl GroqCompletion {
    /// Create a new Groq completion provider.
    pub fn new(config: CompletionConfig) -> EaselResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                EaselError::Configuration("Groq API key not found. Set GROQ_API_KEY environment variable or provide api_key in config.".to_string())
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GROQ_API_URL.to_string());
        let base_url = url::Url::parse(&base_url)
            .map_err(|e| EaselError::Configuration(format!("Invalid completion URL: {}", e)))?;
        let endpoint = format!(
            "{}/chat/completions",
            base_url.as_str().trim_end_matches('/')
        );

        let client = Client::builder()
            .build()
            .map_err(|e| EaselError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key: SecretString::new(api_key),
            endpoint,
        })
    }
}

#[async_trait]
impl Completion for GroqCompletion {
    async fn complete(&self, conversation: &ConversationState) -> EaselResult<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: conversation.turns(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            stream: false,
        };

        debug!(model = %self.config.model, messages = conversation.len(), "Requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                EaselError::completion(format!("Groq API request failed: {}", e)).with_source(e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                EaselError::completion(format!("Failed to read response body: {}", e)).with_source(e)
            })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(EaselError::completion_status(
                status.as_u16(),
                format!("Groq API error ({}): {}", status, message),
            ));
        }

        let response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            EaselError::completion_payload(format!("Failed to parse response: {}", e)).with_source(e)
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| EaselError::completion_payload("No response choices returned"))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
