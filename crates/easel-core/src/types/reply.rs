//! Outcome of a chat turn.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Locator of a generated image, as handed back by the image provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the caller gets back for one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// Display text, with any directive removed or a warning prepended.
    pub text: String,
    /// Generated image, when the reply asked for one and generation succeeded.
    pub image: Option<ImageReference>,
}

impl TurnReply {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(text: impl Into<String>, image: ImageReference) -> Self {
        Self {
            text: text.into(),
            image: Some(image),
        }
    }
}
