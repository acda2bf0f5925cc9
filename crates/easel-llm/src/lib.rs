//! easel-llm - Chat-completion provider for easel.
//!
//! Talks to Groq's OpenAI-compatible `chat/completions` endpoint. Any other
//! endpoint speaking the same format can be used by setting `base_url`.
//!
//! # Example
//!
//! ```ignore
//! use easel_llm::{CompletionConfig, GroqCompletion};
//!
//! let completion = GroqCompletion::new(CompletionConfig::default())?;
//! let reply = completion.complete(&conversation).await?;
//! ```

mod groq;

pub use groq::GroqCompletion;

// Re-export core types for convenience
pub use easel_core::traits::{Completion, CompletionConfig};
