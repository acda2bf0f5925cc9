//! Conversation state and its trimming policy.

mod prompts;
mod state;

pub use prompts::{image_failure_text, DEFAULT_SYSTEM_PREAMBLE, IMAGE_FAILURE_WARNING};
pub use state::{ConversationState, DEFAULT_HISTORY_CAP};
