//! Server state management.

use std::sync::Arc;
use std::time::Duration;

use easel_core::config::ServerConfig;
use easel_core::orchestrator::TurnOrchestrator;
use easel_core::session::SessionStore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Settings for the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub max_age_secs: u64,
    pub secure: bool,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TurnOrchestrator>,
    pub server: Arc<ServerConfig>,
    pub cookie: SessionCookie,
}

impl AppState {
    /// Create application state around a ready orchestrator.
    pub fn new(orchestrator: TurnOrchestrator, server: ServerConfig, session_ttl_secs: u64) -> Self {
        let cookie = SessionCookie {
            max_age_secs: session_ttl_secs,
            secure: server.is_production(),
        };

        Self {
            orchestrator: Arc::new(orchestrator),
            server: Arc::new(server),
            cookie,
        }
    }

    /// Provider error details are only returned outside production.
    pub fn expose_error_details(&self) -> bool {
        !self.server.is_production()
    }

    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        Arc::clone(self.orchestrator.sessions())
    }
}

/// Periodically drop expired sessions from the store.
pub fn spawn_session_sweeper(sessions: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every.max(Duration::from_millis(1)));
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => debug!(removed, "Purged expired sessions"),
                Err(e) => warn!(error = %e, "Session purge failed"),
            }
        }
    })
}
