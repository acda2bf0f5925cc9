//! Extraction of inline `[DRAW: ...]` directives from model replies.
//!
//! The assistant is instructed to request a picture by embedding a marker of
//! the form `[DRAW: <prompt>]` in its reply. Only the first marker is
//! recognised. Later markers are left in the display text untouched. A
//! matched marker always yields a prompt, even a blank one.

use once_cell::sync::Lazy;
use regex::Regex;

/// `[DRAW:` followed by optional whitespace, then the shortest run of
/// non-newline characters up to the first `]`.
static DRAW_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[DRAW:\s*(.*?)\]").expect("draw marker pattern is valid"));

/// Result of scanning one reply for a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch {
    /// Trimmed generation prompt, present whenever a marker was found.
    pub prompt: Option<String>,
    /// The reply with the first marker removed, trimmed.
    pub display_text: String,
}

impl DirectiveMatch {
    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }
}

/// Split a model reply into an optional image prompt and the text to show.
pub fn parse_directive(reply: &str) -> DirectiveMatch {
    let Some(captures) = DRAW_MARKER.captures(reply) else {
        return DirectiveMatch {
            prompt: None,
            display_text: reply.trim().to_string(),
        };
    };

    // Group 0 always exists on a successful capture.
    let marker = captures.get(0).expect("capture group 0");
    let prompt = captures
        .get(1)
        .map(|m| m.as_str().trim().to_string());

    let mut display_text = String::with_capacity(reply.len() - marker.len());
    display_text.push_str(&reply[..marker.start()]);
    display_text.push_str(&reply[marker.end()..]);

    DirectiveMatch {
        prompt,
        display_text: display_text.trim().to_string(),
    }
}
