//! Engine error types.
//!
//! Every failure mode has a named variant. Missing optional data is
//! never an error — it degrades scores instead. These variants cover
//! malformed mandatory input only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A mandatory field is absent or blank on a record.
    #[error("Missing mandatory field '{field}' on company '{company_id}'")]
    MissingField {
        company_id: String,
        field: &'static str,
    },

    /// Acquisition criteria with no usable field at all.
    #[error("Acquisition criteria is entirely empty; at least one targeting field is required")]
    EmptyCriteria,
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
