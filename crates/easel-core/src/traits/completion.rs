//! Completion trait and its configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::conversation::ConversationState;
use crate::error::EaselResult;

/// Text-completion provider: full conversation in, one assistant reply out.
///
/// Implementations return the raw reply text. Any non-success outcome is
/// reported as [`EaselError::Completion`](crate::error::EaselError::Completion).
#[async_trait]
pub trait Completion: Send + Sync {
    /// Produce the next assistant reply for the conversation.
    async fn complete(&self, conversation: &ConversationState) -> EaselResult<String>;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// Completion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Model name/identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Top-p nucleus sampling.
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// API key (if not using environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL for the OpenAI-compatible API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_top_p() -> f32 {
    0.9
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            api_key: None,
            base_url: None,
        }
    }
}
