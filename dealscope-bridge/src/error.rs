//! Bridge error types.
//!
//! Every failure mode has a named variant. Note what is NOT here:
//! malformed collaborator output. That degrades through
//! [`crate::narrative::NarrativeOutcome`] instead of erroring, because
//! the collaborator's quality is not the core's failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The transport to the collaborator failed (timeout, connection).
    #[error("Narrative service unreachable: {0}")]
    ServiceUnreachable(String),

    /// Our own outbound payload failed to serialize. This is a bug on
    /// our side, not the collaborator's.
    #[error("Failed to serialize prompt payload: {0}")]
    PromptSerialization(#[from] serde_json::Error),
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
