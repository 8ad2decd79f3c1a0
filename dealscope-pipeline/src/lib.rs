//! dealscope-pipeline — the matching funnel.
//!
//! Reduces a pool of thousands of candidate companies to a bounded,
//! ranked shortlist against a buyer's acquisition criteria, before any
//! expensive narrative analysis runs. Scoring is deterministic and
//! explainable: a single additive rubric over static taxonomy tables
//! and the candidate record itself, one linear pass, no per-candidate
//! external calls.
//!
//! The funnel is wired as a candidate pipeline: sources produce
//! candidates, scorers attach scores, filters partition on them, the
//! selector sorts and truncates, side effects observe the outcome.

pub mod batch;
pub mod candidate_pipeline;
pub mod company_loader;
pub mod components;
pub mod filter;
pub mod pipelines;
pub mod prescore;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;

pub use candidate_pipeline::CandidatePipeline;
pub use pipelines::buyer_match::{run_funnel, BuyerMatchPipeline, FunnelOutcome};
pub use prescore::{pre_score, ScoreBreakdown};
pub use types::{CompanyCandidate, FunnelConfig, MatchQuery};
