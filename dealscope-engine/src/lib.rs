//! dealscope-engine — deterministic company scoring & financial estimation.
//!
//! Everything in this crate is a pure function over in-memory inputs:
//! no I/O, no shared mutable state, safe to call from any number of
//! threads. The crate covers the analytic half of the dealscope stack:
//!
//! - sector taxonomy (industry-code ranges, directed adjacency,
//!   per-sector benchmarks) injected as an immutable [`Taxonomy`];
//! - capital tier and maturity classification;
//! - regime and location adjustment factors;
//! - the two-method revenue estimator with convergence and a 0–100
//!   confidence scorecard;
//! - the alert synthesizer that turns classifier/estimator output into
//!   structured risk alerts.
//!
//! Missing optional data degrades scores and confidence; it never
//! raises. The only intrinsic failure is malformed mandatory input,
//! reported as [`EngineError::MissingField`].

pub mod adjusters;
pub mod alerts;
pub mod capital;
pub mod error;
pub mod estimator;
pub mod taxonomy;
pub mod types;

pub use adjusters::{location_factor, regime_factor, LocationFactor, RegimeFactor};
pub use alerts::{synthesize_alerts, Alert, Severity};
pub use capital::{capital_tier, maturity_signal, CapitalTier, Maturity, MaturitySignal};
pub use error::EngineError;
pub use estimator::{Estimator, EstimatorConfig, EstimationResult, WorkerBucket};
pub use taxonomy::{Sector, SectorProfile, Taxonomy};
pub use types::{AcquisitionCriteria, CompanyRecord, RegimeBucket, RegistrationStatus};
