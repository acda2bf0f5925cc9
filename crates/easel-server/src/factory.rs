//! Factory for building the turn orchestrator from configuration.

use std::sync::Arc;

use easel_core::config::EaselConfig;
use easel_core::error::EaselResult;
use easel_core::orchestrator::TurnOrchestrator;
use easel_core::session::{InMemorySessionStore, SessionStore};
use easel_core::traits::{Completion, ImageGenerator};
use easel_imagegen::PixazoImageGenerator;
use easel_llm::GroqCompletion;
use tracing::info;

/// Create a TurnOrchestrator wired to the configured providers.
pub fn create_orchestrator(config: &EaselConfig) -> EaselResult<TurnOrchestrator> {
    let completion: Arc<dyn Completion> = Arc::new(GroqCompletion::new(config.completion.clone())?);
    let images: Arc<dyn ImageGenerator> =
        Arc::new(PixazoImageGenerator::new(config.image.clone())?);
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::with_ttl_secs(
        config.relay.session_ttl_secs,
    ));

    info!(
        completion_model = completion.model_name(),
        image_model = images.model_name(),
        history_cap = config.relay.history_cap,
        "Providers configured"
    );

    Ok(TurnOrchestrator::new(
        completion,
        images,
        sessions,
        &config.relay,
    ))
}
