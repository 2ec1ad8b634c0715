//! Error types for the Docket library.

use thiserror::Error;
use uuid::Uuid;

use crate::workflow::Action;

/// Main error type for Docket operations.
#[derive(Debug, Error)]
pub enum DocketError {
    /// No active event exists for the given id.
    #[error("event '{0}' not found")]
    NotFound(String),

    /// A raw topic key failed to parse.
    #[error("malformed topic key '{raw}': {reason}")]
    MalformedKey { raw: String, reason: String },

    /// Patch operations could not be applied to the event payload.
    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    /// The authorization collaborator denied the operation.
    #[error("{action} on event '{event_id}' denied")]
    Forbidden { event_id: String, action: Action },

    /// The underlying store failed; retryable by the caller, not recovered here.
    #[error("store unavailable: {0}")]
    Store(String),

    /// The item-resolution collaborator could not resolve a target.
    #[error("failed to resolve target item '{target}': {reason}")]
    TargetResolution { target: Uuid, reason: String },

    /// Error saving or loading a snapshot file.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocketError {
    /// Check whether this error means the event does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocketError::NotFound(_))
    }
}

/// Result type alias for Docket operations.
pub type Result<T> = std::result::Result<T, DocketError>;
