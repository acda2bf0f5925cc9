//! In-process session store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::conversation::ConversationState;
use crate::error::EaselResult;
use crate::session::{SessionKey, SessionStore, DEFAULT_SESSION_TTL_SECS};

struct Entry {
    state: ConversationState,
    touched_at: DateTime<Utc>,
}

/// Session store backed by a `HashMap` in process memory.
///
/// Entries idle for longer than the TTL read as absent. Nothing survives a
/// restart.
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<SessionKey, Entry>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    /// Create a store with the default 24 hour TTL.
    pub fn new() -> Self {
        Self::with_ttl_secs(DEFAULT_SESSION_TTL_SECS)
    }

    /// Create a store whose sessions expire after `ttl_secs` of inactivity.
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
        }
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.touched_at) > self.ttl
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &SessionKey) -> EaselResult<Option<ConversationState>> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let expired = match entries.get(key) {
            Some(entry) => self.is_expired(entry, now),
            None => return Ok(None),
        };

        if expired {
            debug!(session = %key, "Session expired");
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get_mut(key).map(|entry| {
            entry.touched_at = now;
            entry.state.clone()
        }))
    }

    async fn save(&self, key: &SessionKey, state: ConversationState) -> EaselResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.clone(),
            Entry {
                state,
                touched_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &SessionKey) -> EaselResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> EaselResult<usize> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        Ok(before - entries.len())
    }

    async fn len(&self) -> EaselResult<usize> {
        let now = Utc::now();
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|entry| !self.is_expired(entry, now))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turn;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_load_missing_session() {
        let store = InMemorySessionStore::new();
        let loaded = assert_ok!(store.load(&SessionKey::from("nobody")).await);
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = InMemorySessionStore::new();
        let key = SessionKey::from("abc");
        let mut state = ConversationState::initialize();
        state.append(Turn::user("hello")).unwrap();

        assert_ok!(store.save(&key, state.clone()).await);

        let loaded = store.load(&key).await.unwrap();
        assert_eq!(loaded, Some(state));
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_partitioned() {
        let store = InMemorySessionStore::new();
        let mut a = ConversationState::initialize();
        a.append(Turn::user("from a")).unwrap();

        store.save(&SessionKey::from("a"), a).await.unwrap();
        store
            .save(&SessionKey::from("b"), ConversationState::initialize())
            .await
            .unwrap();

        let b = store.load(&SessionKey::from("b")).await.unwrap().unwrap();
        assert_eq!(b.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_entries() {
        let store = InMemorySessionStore::with_ttl_secs(0);
        let key = SessionKey::from("short");
        store
            .save(&key, ConversationState::initialize())
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        assert_eq!(store.len().await.unwrap(), 0);
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store.load(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::new();
        let key = SessionKey::from("gone");
        store
            .save(&key, ConversationState::initialize())
            .await
            .unwrap();
        store.remove(&key).await.unwrap();
        assert!(store.load(&key).await.unwrap().is_none());
    }
}
