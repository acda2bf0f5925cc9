//! easel-core - Core library for easel.
//!
//! This crate provides the conversation model, the `[DRAW: ...]` directive
//! parser, the session store abstraction and the turn orchestrator that
//! drives one chat exchange against a completion provider and an image
//! provider.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use easel_core::{EaselConfig, InMemorySessionStore, SessionKey, TurnOrchestrator};
//!
//! let config = EaselConfig::load()?;
//! let orchestrator = TurnOrchestrator::new(
//!     completion,
//!     images,
//!     Arc::new(InMemorySessionStore::with_ttl_secs(config.relay.session_ttl_secs)),
//!     &config.relay,
//! );
//!
//! let reply = orchestrator
//!     .handle_turn(&SessionKey::from("visitor-1"), "Show me a cosy reading nook")
//!     .await?;
//! ```

pub mod config;
pub mod conversation;
pub mod directive;
pub mod error;
pub mod orchestrator;
pub mod session;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{EaselConfig, RelayConfig, RunMode, ServerConfig};
pub use conversation::{ConversationState, DEFAULT_HISTORY_CAP};
pub use directive::{parse_directive, DirectiveMatch};
pub use error::{EaselError, EaselResult, ErrorCode};
pub use orchestrator::{TurnOrchestrator, TurnPhase};
pub use session::{InMemorySessionStore, SessionKey, SessionStore};
pub use traits::{Completion, CompletionConfig, ImageConfig, ImageGenerator};
pub use types::{ImageReference, Role, Turn, TurnReply};
