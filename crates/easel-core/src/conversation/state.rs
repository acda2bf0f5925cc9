//! Per-session conversation transcript.

use serde::{Deserialize, Serialize};

use crate::conversation::prompts::DEFAULT_SYSTEM_PREAMBLE;
use crate::error::{EaselError, EaselResult};
use crate::types::{Role, Turn};

/// Default number of turns kept after trimming, system turn included.
pub const DEFAULT_HISTORY_CAP: usize = 12;

/// Ordered transcript of one session.
///
/// Index 0 is always the system preamble and is never evicted. The only
/// mutations are [`append`](Self::append) and [`trim`](Self::trim).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Turn>", into = "Vec<Turn>")]
pub struct ConversationState {
    turns: Vec<Turn>,
}

impl ConversationState {
    /// Fresh conversation holding only the default preamble.
    pub fn initialize() -> Self {
        Self::with_preamble(DEFAULT_SYSTEM_PREAMBLE)
    }

    /// Fresh conversation holding only the given preamble.
    pub fn with_preamble(preamble: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(preamble)],
        }
    }

    /// Append a user or assistant turn.
    ///
    /// Blank user turns and additional system turns are refused.
    pub fn append(&mut self, turn: Turn) -> EaselResult<()> {
        match turn.role() {
            Role::System => {
                return Err(EaselError::invalid_turn(
                    "system turn may only appear at the start of a conversation",
                ))
            }
            Role::User if turn.content().trim().is_empty() => {
                return Err(EaselError::invalid_turn("user turn must not be empty"))
            }
            _ => {}
        }

        self.turns.push(turn);
        Ok(())
    }

    /// Keep the system turn plus the most recent `cap - 1` turns.
    ///
    /// `cap` is clamped to at least 1 so the preamble always survives.
    pub fn trim(&mut self, cap: usize) {
        let cap = cap.max(1);
        if self.turns.len() <= cap {
            return;
        }

        let drop = self.turns.len() - cap;
        self.turns.drain(1..=drop);
    }

    /// The system preamble turn.
    pub fn system_turn(&self) -> &Turn {
        &self.turns[0]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent turn.
    pub fn last(&self) -> &Turn {
        // Never empty: index 0 is the preamble.
        &self.turns[self.turns.len() - 1]
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::initialize()
    }
}

impl TryFrom<Vec<Turn>> for ConversationState {
    type Error = EaselError;

    fn try_from(turns: Vec<Turn>) -> Result<Self, Self::Error> {
        match turns.first() {
            Some(first) if first.role() == Role::System => {}
            _ => {
                return Err(EaselError::invalid_turn(
                    "conversation must start with a system turn",
                ))
            }
        }

        if turns[1..].iter().any(|t| t.role() == Role::System) {
            return Err(EaselError::invalid_turn(
                "system turn may only appear at the start of a conversation",
            ));
        }

        Ok(Self { turns })
    }
}

impl From<ConversationState> for Vec<Turn> {
    fn from(state: ConversationState) -> Self {
        state.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn filled(extra: usize) -> ConversationState {
        let mut state = ConversationState::initialize();
        for i in 0..extra {
            let turn = if i % 2 == 0 {
                Turn::user(format!("message {i}"))
            } else {
                Turn::assistant(format!("message {i}"))
            };
            state.append(turn).unwrap();
        }
        state
    }

    #[test]
    fn test_initialize_holds_only_preamble() {
        let state = ConversationState::initialize();
        assert_eq!(state.len(), 1);
        assert_eq!(state.system_turn().role(), Role::System);
        assert!(state.system_turn().content().contains("[DRAW:"));
    }

    #[test]
    fn test_append_rejects_blank_user_turn() {
        let mut state = ConversationState::initialize();
        let err = state.append(Turn::user("   \n")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValInvalidTurn);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_append_rejects_second_system_turn() {
        let mut state = ConversationState::initialize();
        assert!(state.append(Turn::system("override")).is_err());
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_append_allows_empty_assistant_turn() {
        let mut state = ConversationState::initialize();
        state.append(Turn::assistant("")).unwrap();
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_trim_keeps_system_and_latest_turns() {
        let mut state = filled(20);
        let original = state.clone();

        state.trim(DEFAULT_HISTORY_CAP);

        assert_eq!(state.len(), 12);
        assert_eq!(state.system_turn(), original.system_turn());
        assert_eq!(&state.turns()[1..], &original.turns()[10..]);
        assert_eq!(state.last().content(), "message 19");
    }

    #[test]
    fn test_trim_under_cap_is_noop() {
        let mut state = filled(11);
        let original = state.clone();
        state.trim(DEFAULT_HISTORY_CAP);
        assert_eq!(state, original);
    }

    #[test]
    fn test_trim_with_zero_cap_keeps_preamble() {
        let mut state = filled(3);
        state.trim(0);
        assert_eq!(state.len(), 1);
        assert_eq!(state.system_turn().role(), Role::System);
    }

    #[test]
    fn test_deserialize_requires_leading_system_turn() {
        let json = r#"[{"role":"user","content":"hi"}]"#;
        assert!(serde_json::from_str::<ConversationState>(json).is_err());

        let state = filled(2);
        let json = serde_json::to_string(&state).unwrap();
        let restored: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
