use serde::Serialize;

use dealscope_engine::{AcquisitionCriteria, CompanyRecord};

use crate::candidate_pipeline::HasRequestId;
use crate::prescore::ScoreBreakdown;

/// Tunable funnel parameters. The defaults are the production
/// calibration; both values are deliberate knobs, not intrinsic
/// constants. The threshold is permissive on purpose: the funnel's job
/// is recall-preserving reduction, and precision is recovered
/// downstream by narrative analysis.
#[derive(Clone, Copy, Debug)]
pub struct FunnelConfig {
    /// Minimum pre-score a candidate needs to survive the funnel.
    pub min_score: f64,
    /// Maximum shortlist size after ranking.
    pub shortlist_size: usize,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            min_score: 30.0,
            shortlist_size: 50,
        }
    }
}

/// One funnel invocation: a buyer's criteria plus a request id for
/// log correlation.
#[derive(Clone, Debug)]
pub struct MatchQuery {
    pub request_id: String,
    pub criteria: AcquisitionCriteria,
    pub config: FunnelConfig,
}

impl MatchQuery {
    pub fn new(request_id: impl Into<String>, criteria: AcquisitionCriteria) -> Self {
        Self {
            request_id: request_id.into(),
            criteria,
            config: FunnelConfig::default(),
        }
    }
}

impl HasRequestId for MatchQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

/// A company flowing through the funnel. Created fresh per invocation
/// and discarded after the shortlist is handed downstream.
#[derive(Clone, Debug, Serialize)]
pub struct CompanyCandidate {
    pub record: CompanyRecord,

    // Scoring fields (populated by the rubric scorer)
    pub pre_score: Option<f64>,
    pub breakdown: Option<ScoreBreakdown>,

    // Ranking position (populated after selection)
    pub rank: Option<usize>,
}

impl CompanyCandidate {
    pub fn new(record: CompanyRecord) -> Self {
        Self {
            record,
            pre_score: None,
            breakdown: None,
            rank: None,
        }
    }

    pub fn score_or_zero(&self) -> f64 {
        self.pre_score.unwrap_or(0.0)
    }
}
