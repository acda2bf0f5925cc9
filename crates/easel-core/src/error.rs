//! Error types for easel operations.
//!
//! Every failure a chat turn can hit is folded into [`EaselError`] before it
//! reaches the orchestrator. Provider crates convert their transport errors
//! into the `Completion` and `Generation` variants, keeping the underlying
//! error reachable through [`std::error::Error::source`].

use thiserror::Error;

/// Boxed underlying cause of a provider failure.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for easel operations.
pub type EaselResult<T> = Result<T, EaselError>;

/// Main error type for all easel operations.
#[derive(Error, Debug)]
pub enum EaselError {
    /// Input validation failed (empty message, invalid turn).
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// The text-completion provider failed. Fatal for the turn.
    #[error("Completion error: {message}")]
    Completion {
        message: String,
        code: ErrorCode,
        status: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The image-generation provider failed. The turn degrades to text only.
    #[error("Generation error: {message}")]
    Generation {
        message: String,
        code: ErrorCode,
        status: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValEmptyMessage,
    ValInvalidTurn,

    // Completion (CMP_xxx)
    CmpConnectionFailed,
    CmpProviderRejected,
    CmpInvalidResponse,

    // Generation (GEN_xxx)
    GenConnectionFailed,
    GenProviderRejected,
    GenInvalidResponse,

    // Configuration and IO
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValEmptyMessage => "VAL_001",
            ErrorCode::ValInvalidTurn => "VAL_002",
            ErrorCode::CmpConnectionFailed => "CMP_001",
            ErrorCode::CmpProviderRejected => "CMP_002",
            ErrorCode::CmpInvalidResponse => "CMP_003",
            ErrorCode::GenConnectionFailed => "GEN_001",
            ErrorCode::GenProviderRejected => "GEN_002",
            ErrorCode::GenInvalidResponse => "GEN_003",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl EaselError {
    /// Create a validation error for a missing or blank user message.
    pub fn empty_message() -> Self {
        Self::Validation {
            message: "Message is required".to_string(),
            code: ErrorCode::ValEmptyMessage,
        }
    }

    /// Create a validation error for a turn the conversation refuses.
    pub fn invalid_turn(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidTurn,
        }
    }

    /// Create a completion error that never got a response.
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion {
            message: message.into(),
            code: ErrorCode::CmpConnectionFailed,
            status: None,
            source: None,
        }
    }

    /// Create a completion error from a non-success provider status.
    pub fn completion_status(status: u16, message: impl Into<String>) -> Self {
        Self::Completion {
            message: message.into(),
            code: ErrorCode::CmpProviderRejected,
            status: Some(status),
            source: None,
        }
    }

    /// Create a completion error for a reply that could not be understood.
    pub fn completion_payload(message: impl Into<String>) -> Self {
        Self::Completion {
            message: message.into(),
            code: ErrorCode::CmpInvalidResponse,
            status: None,
            source: None,
        }
    }

    /// Create a generation error that never got a response.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            code: ErrorCode::GenConnectionFailed,
            status: None,
            source: None,
        }
    }

    /// Create a generation error from a non-success provider status.
    pub fn generation_status(status: u16, message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            code: ErrorCode::GenProviderRejected,
            status: Some(status),
            source: None,
        }
    }

    /// Create a generation error for a reply that could not be understood.
    pub fn generation_payload(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            code: ErrorCode::GenInvalidResponse,
            status: None,
            source: None,
        }
    }

    /// Attach the underlying cause to a provider error. Other variants are
    /// returned unchanged.
    pub fn with_source(mut self, cause: impl Into<BoxedSource>) -> Self {
        if let Self::Completion { source, .. } | Self::Generation { source, .. } = &mut self {
            *source = Some(cause.into());
        }
        self
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::Completion { code, .. } => *code,
            Self::Generation { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Provider HTTP status, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Completion { status, .. } | Self::Generation { status, .. } => *status,
            _ => None,
        }
    }

    /// The bare detail message, without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Completion { message, .. }
            | Self::Generation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
