//! Error types for listkit.

use thiserror::Error;

/// Fallback message for list fetches that fail without a message.
pub const DEFAULT_LOAD_ERROR: &str = "Failed to load";

/// Fallback message for auto-save calls that fail without a message.
pub const DEFAULT_SAVE_ERROR: &str = "Failed to save";

/// Failure reported by a fetch or save capability.
///
/// Carries the backend's message verbatim. An empty message is replaced by a
/// fixed fallback so callers always have something to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build an error, falling back to `fallback` when `message` is blank.
    pub fn with_fallback(message: impl Into<String>, fallback: &str) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::new(fallback)
        } else {
            Self { message }
        }
    }

    /// Replace a blank message with `fallback`.
    pub fn or_fallback(self, fallback: &str) -> Self {
        Self::with_fallback(self.message, fallback)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::with_fallback(err.to_string(), DEFAULT_LOAD_ERROR)
    }
}

/// Form field rule failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("No whitespace, max 40 characters")]
    NamePattern,

    #[error("Max 255 characters, no tabs or newlines")]
    DescriptionPattern,
}

/// Crate-level errors
#[derive(Debug, Error)]
pub enum ListkitError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Credential storage error: {0}")]
    Credential(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ListkitError {
    fn from(err: config::ConfigError) -> Self {
        ListkitError::ConfigError(err.to_string())
    }
}
