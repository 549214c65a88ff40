//! Error types for the evently ecosystem.

use thiserror::Error;

/// Errors that can occur in evently operations.
#[derive(Error, Debug)]
pub enum EventlyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Device is offline")]
    Connection,

    #[error("Store error [{code}]: {message}")]
    Store { code: String, message: String },

    #[error("Store backend '{0}' not found in PATH")]
    StoreNotInstalled(String),

    #[error("Store request timed out after {0}s")]
    StoreTimeout(u64),

    #[error("Invalid month number: {0}")]
    InvalidMonth(u32),

    #[error("Undecodable event document '{id}': {reason}")]
    Decode { id: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for evently operations.
pub type EventlyResult<T> = Result<T, EventlyError>;

/// Scope keys for the two-part error signals surfaced to the UI layer.
pub mod scope {
    pub const CALENDAR_ERROR: &str = "calendar.error";
    pub const EVENT_CREATED_ERROR: &str = "entities.created.error";
    pub const EVENT_CREATED_SUCCESS: [&str; 2] =
        ["entities.created.success.0", "entities.created.success.1"];
}

/// A pair of opaque lookup keys surfaced to the presentation layer,
/// which resolves them to localized user-facing text. The engine never
/// builds user-facing prose itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub title: String,
    pub detail: String,
}

impl Signal {
    pub fn new(title: &str, detail: impl Into<String>) -> Self {
        Signal {
            title: title.to_string(),
            detail: detail.into(),
        }
    }

    /// Signal for a failed operation under the given scope key.
    pub fn failure(scope: &str, err: &EventlyError) -> Self {
        Signal::new(scope, err.detail_key())
    }

    /// Success signal for event creation.
    pub fn created() -> Self {
        Signal::new(
            scope::EVENT_CREATED_SUCCESS[0],
            scope::EVENT_CREATED_SUCCESS[1],
        )
    }
}

impl EventlyError {
    /// The detail lookup key for this error. Store error codes pass
    /// through opaquely; the translator owns what they mean.
    pub fn detail_key(&self) -> String {
        match self {
            EventlyError::Connection => "errors.connection".to_string(),
            EventlyError::Store { code, .. } => format!("errors.{code}"),
            EventlyError::StoreTimeout(_) => "errors.timeout".to_string(),
            EventlyError::StoreNotInstalled(_) => "errors.unavailable".to_string(),
            _ => "errors.unknown".to_string(),
        }
    }
}
