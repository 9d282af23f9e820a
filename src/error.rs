use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Where in the response parser a format failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// The first brace (or bracket) delimited block found in the text
    EmbeddedBlock,
    /// The whole response text, used when no delimited block exists
    WholeText,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::EmbeddedBlock => write!(f, "embedded block"),
            ParseStage::WholeText => write!(f, "whole text"),
        }
    }
}

/// Failures reaching the chat-completion service
#[derive(Error, Debug)]
pub enum TransportError {
    /// The service answered with a non-success status
    #[error("Chat completion request failed: {status} - {reason}")]
    Status { status: u16, reason: String },

    /// DNS, connection or protocol failure
    #[error("Chat completion request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// No answer within the configured timeout
    #[error("Chat completion request timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors that can occur while generating, parsing or walking through recipes
#[derive(Error, Debug)]
pub enum CookAlongError {
    /// Network or HTTP failure talking to the chat-completion service
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Model output could not be parsed as JSON
    #[error("Failed to parse model output ({stage}): {message}")]
    Format { stage: ParseStage, message: String },

    /// Model output parsed but does not have the expected shape
    #[error("Unexpected recipe structure: {0}")]
    Schema(String),

    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A transition was requested from a state that does not allow it
    #[error("Cannot {action} while {state}")]
    State {
        action: &'static str,
        state: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CookAlongError {
    pub(crate) fn format(stage: ParseStage, err: impl fmt::Display) -> Self {
        CookAlongError::Format {
            stage,
            message: err.to_string(),
        }
    }

    /// Message shown on the input screen after a failed submission
    pub fn user_message(&self) -> String {
        match self {
            CookAlongError::Transport(TransportError::Timeout(_)) => {
                "The recipe service took too long to answer. Please try again.".to_string()
            }
            CookAlongError::Transport(_) => {
                "Could not reach the recipe service. Please try again.".to_string()
            }
            CookAlongError::Format { .. } | CookAlongError::Schema(_) => {
                "The recipe service returned something we could not read. Please try again."
                    .to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, CookAlongError::Transport(_))
    }
}

impl From<reqwest::Error> for CookAlongError {
    fn from(err: reqwest::Error) -> Self {
        CookAlongError::Transport(TransportError::Network(err))
    }
}
