//! Session-keyed storage of conversation state.
//!
//! The orchestrator only talks to [`SessionStore`], so the backend (process
//! memory, an external cache, a database) can be swapped without touching
//! the turn logic.

mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conversation::ConversationState;
use crate::error::EaselResult;

pub use memory::InMemorySessionStore;

/// Default idle lifetime of a session, in seconds (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Opaque session identifier supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for SessionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Key-value store from session key to conversation state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the state for a session, or `None` if absent or expired.
    async fn load(&self, key: &SessionKey) -> EaselResult<Option<ConversationState>>;

    /// Store the state for a session, replacing any previous value.
    async fn save(&self, key: &SessionKey, state: ConversationState) -> EaselResult<()>;

    /// Forget a session entirely.
    async fn remove(&self, key: &SessionKey) -> EaselResult<()>;

    /// Drop expired sessions; returns how many were removed.
    async fn purge_expired(&self) -> EaselResult<usize>;

    /// Number of live sessions currently held.
    async fn len(&self) -> EaselResult<usize>;
}
