//! Turn orchestration: one user message in, one reply out.
//!
//! A turn walks `Idle → AwaitingCompletion → ParsingDirective →
//! AwaitingImage (only when a prompt was found) → Responding → Idle`.
//! Nothing is held locked across the provider calls: the session state is
//! loaded, worked on as a local value and saved back at the end, so two
//! overlapping turns on the same session resolve as last-write-wins.

use std::sync::Arc;
use std::time::Instant;

use strum::Display;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::conversation::{image_failure_text, ConversationState};
use crate::directive::parse_directive;
use crate::error::{EaselError, EaselResult};
use crate::session::{SessionKey, SessionStore};
use crate::traits::{Completion, ImageGenerator};
use crate::types::{ImageReference, Turn, TurnReply};

/// Phase of a turn, reported in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    Idle,
    AwaitingCompletion,
    ParsingDirective,
    AwaitingImage,
    Responding,
}

/// Runs chat turns against a completion provider, an image provider and a
/// session store.
pub struct TurnOrchestrator {
    completion: Arc<dyn Completion>,
    images: Arc<dyn ImageGenerator>,
    sessions: Arc<dyn SessionStore>,
    history_cap: usize,
    preamble: String,
}

impl TurnOrchestrator {
    pub fn new(
        completion: Arc<dyn Completion>,
        images: Arc<dyn ImageGenerator>,
        sessions: Arc<dyn SessionStore>,
        config: &RelayConfig,
    ) -> Self {
        Self {
            completion,
            images,
            sessions,
            history_cap: config.history_cap,
            preamble: config.system_preamble.clone(),
        }
    }

    /// A freshly initialized conversation with the configured preamble.
    pub fn fresh_conversation(&self) -> ConversationState {
        ConversationState::with_preamble(self.preamble.clone())
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub fn completion_model(&self) -> &str {
        self.completion.model_name()
    }

    pub fn image_model(&self) -> &str {
        self.images.model_name()
    }

    /// Run one chat turn for a session.
    ///
    /// Blank messages are rejected before the conversation changes. A completion
    /// failure resets the session to a fresh conversation and is returned as
    /// an error. An image failure is folded into the reply text.
    pub async fn handle_turn(&self, session: &SessionKey, message: &str) -> EaselResult<TurnReply> {
        let started = Instant::now();

        let mut conversation = match self.sessions.load(session).await? {
            Some(conversation) => conversation,
            None => {
                debug!(session = %session, "Initializing conversation");
                let fresh = self.fresh_conversation();
                self.sessions.save(session, fresh.clone()).await?;
                fresh
            }
        };

        if message.trim().is_empty() {
            return Err(EaselError::empty_message());
        }

        conversation.append(Turn::user(message))?;

        debug!(session = %session, phase = %TurnPhase::AwaitingCompletion, turns = conversation.len());
        let raw_reply = match self.completion.complete(&conversation).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    session = %session,
                    error = %err,
                    status = ?err.status(),
                    "Completion failed, resetting conversation"
                );
                if let Err(save_err) = self.sessions.save(session, self.fresh_conversation()).await {
                    warn!(session = %session, error = %save_err, "Could not reset conversation");
                }
                return Err(err);
            }
        };

        debug!(session = %session, phase = %TurnPhase::ParsingDirective);
        let directive = parse_directive(&raw_reply);

        let (text, image) = match directive.prompt {
            Some(prompt) => {
                debug!(session = %session, phase = %TurnPhase::AwaitingImage, prompt_chars = prompt.len());
                match self.images.generate(&prompt).await {
                    Ok(image) => (directive.display_text, Some(image)),
                    Err(err) => {
                        warn!(session = %session, error = %err, "Image generation failed");
                        (image_failure_text(&err.detail(), &directive.display_text), None)
                    }
                }
            }
            None => (directive.display_text, None),
        };

        debug!(session = %session, phase = %TurnPhase::Responding);
        conversation.append(Turn::assistant(text.clone()))?;
        conversation.trim(self.history_cap);
        let turns = conversation.len();
        self.sessions.save(session, conversation).await?;

        info!(
            session = %session,
            turns,
            image = image.is_some(),
            duration_ms = %started.elapsed().as_millis(),
            "Turn completed"
        );

        Ok(reply(text, image))
    }

    /// Replace the session's conversation with a fresh one.
    pub async fn reset(&self, session: &SessionKey) -> EaselResult<()> {
        self.sessions.save(session, self.fresh_conversation()).await?;
        info!(session = %session, "Conversation reset");
        Ok(())
    }
}

fn reply(text: String, image: Option<ImageReference>) -> TurnReply {
    match image {
        Some(image) => TurnReply::with_image(text, image),
        None => TurnReply::text_only(text),
    }
}
