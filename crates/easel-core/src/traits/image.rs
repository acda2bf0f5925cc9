//! Image generation trait and its configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EaselResult;
use crate::types::ImageReference;

/// Image-generation provider: prompt in, image locator out.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the prompt.
    async fn generate(&self, prompt: &str) -> EaselResult<ImageReference>;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// Fixed generation parameters.
///
/// The seed is not configurable: a fresh one is drawn from `0..seed_range`
/// on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Square edge length in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Number of diffusion steps.
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Exclusive upper bound for the random seed.
    #[serde(default = "default_seed_range")]
    pub seed_range: u32,
    /// API key (if not using environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Full endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_size() -> u32 {
    512
}

fn default_steps() -> u32 {
    4
}

fn default_seed_range() -> u32 {
    10_000
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            steps: default_steps(),
            seed_range: default_seed_range(),
            api_key: None,
            base_url: None,
        }
    }
}
