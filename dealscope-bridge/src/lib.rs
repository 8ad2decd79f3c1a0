//! dealscope-bridge — the boundary with the narrative collaborator.
//!
//! The deterministic core hands the LLM structured input (a funnel
//! shortlist or a per-company estimation summary) and gets back free
//! text that may or may not be the JSON it was asked for. This crate
//! holds both directions of that boundary:
//!
//! - outbound: typed prompt payloads serialized for the collaborator;
//! - inbound: defensive parsing that degrades to "narrative
//!   unavailable" instead of erroring, and validation that rejects
//!   narratives referencing companies the funnel never produced.
//!
//! The core guarantees its own outputs are well-typed no matter what
//! the collaborator does with them. A misbehaving LLM is an external
//! service-quality issue, never a core failure.

pub mod error;
pub mod narrative;
pub mod validate;

pub use error::BridgeError;
pub use narrative::{
    parse_narrative, CompanyNarrative, NarrativeClient, NarrativeInput, NarrativeOutcome,
    ShortlistNarrative,
};
pub use validate::{validate_shortlist_narrative, Severity, ValidationResult, Violation};
