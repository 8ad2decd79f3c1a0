//! The buyer-match funnel pipeline.
//!
//! Pipeline flow:
//! 1. `PoolSource` validates the raw pool and emits candidates
//! 2. `RubricScorer` attaches the additive pre-score
//! 3. `MinScoreFilter` drops candidates below the inclusion threshold
//! 4. `ShortlistSelector` ranks and truncates to the shortlist size
//! 5. `FunnelLogSideEffect` records the outcome
//!
//! The shortlist then goes to the narrative collaborator for the final
//! qualitative pass; nothing here is persisted.

use async_trait::async_trait;
use std::sync::Arc;

use dealscope_engine::{AcquisitionCriteria, CompanyRecord, Taxonomy};

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::funnel_log_side_effect::FunnelLogSideEffect;
use crate::components::min_score_filter::MinScoreFilter;
use crate::components::pool_source::PoolSource;
use crate::components::rubric_scorer::RubricScorer;
use crate::components::shortlist_selector::ShortlistSelector;
use crate::filter::Filter;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{CompanyCandidate, FunnelConfig, MatchQuery};

pub struct BuyerMatchPipeline {
    sources: Vec<Box<dyn Source<MatchQuery, CompanyCandidate>>>,
    scorers: Vec<Box<dyn Scorer<MatchQuery, CompanyCandidate>>>,
    filters: Vec<Box<dyn Filter<MatchQuery, CompanyCandidate>>>,
    selector: ShortlistSelector,
    side_effects: Arc<Vec<Box<dyn SideEffect<MatchQuery, CompanyCandidate>>>>,
}

impl BuyerMatchPipeline {
    /// Wire the funnel over an in-memory pool with shared taxonomy
    /// tables and the given funnel calibration.
    pub fn new(pool: Vec<CompanyRecord>, taxonomy: Arc<Taxonomy>, config: FunnelConfig) -> Self {
        let sources: Vec<Box<dyn Source<MatchQuery, CompanyCandidate>>> =
            vec![Box::new(PoolSource::new(pool))];

        let scorers: Vec<Box<dyn Scorer<MatchQuery, CompanyCandidate>>> =
            vec![Box::new(RubricScorer::new(taxonomy))];

        let filters: Vec<Box<dyn Filter<MatchQuery, CompanyCandidate>>> =
            vec![Box::new(MinScoreFilter)];

        let selector = ShortlistSelector {
            k: config.shortlist_size,
        };

        let side_effects: Arc<Vec<Box<dyn SideEffect<MatchQuery, CompanyCandidate>>>> =
            Arc::new(vec![Box::new(FunnelLogSideEffect)]);

        Self {
            sources,
            scorers,
            filters,
            selector,
            side_effects,
        }
    }
}

#[async_trait]
impl CandidatePipeline<MatchQuery, CompanyCandidate> for BuyerMatchPipeline {
    fn sources(&self) -> &[Box<dyn Source<MatchQuery, CompanyCandidate>>] {
        &self.sources
    }

    fn scorers(&self) -> &[Box<dyn Scorer<MatchQuery, CompanyCandidate>>] {
        &self.scorers
    }

    fn filters(&self) -> &[Box<dyn Filter<MatchQuery, CompanyCandidate>>] {
        &self.filters
    }

    fn selector(&self) -> &dyn Selector<MatchQuery, CompanyCandidate> {
        &self.selector
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<MatchQuery, CompanyCandidate>>>> {
        Arc::clone(&self.side_effects)
    }
}

/// Final funnel output for the caller.
#[derive(Clone, Debug)]
pub struct FunnelOutcome {
    /// Ranked shortlist, `rank` populated from 1.
    pub shortlist: Vec<CompanyCandidate>,
    /// Valid candidates that entered scoring.
    pub pool_size: usize,
    /// Candidates removed by the inclusion threshold.
    pub filtered_out: usize,
}

/// Run the funnel end to end for one buyer.
///
/// Criteria are validated up front: entirely-empty criteria cannot be
/// scored and is an input error, not an empty result. An empty pool,
/// by contrast, is a legitimate empty shortlist.
pub async fn run_funnel(
    pool: Vec<CompanyRecord>,
    criteria: AcquisitionCriteria,
    taxonomy: Arc<Taxonomy>,
    config: FunnelConfig,
    request_id: impl Into<String>,
) -> Result<FunnelOutcome, String> {
    criteria.validate().map_err(|e| e.to_string())?;

    let pipeline = BuyerMatchPipeline::new(pool, taxonomy, config);
    let query = MatchQuery {
        request_id: request_id.into(),
        criteria,
        config,
    };

    let run = pipeline.run(query).await?;

    let mut shortlist = run.selected;
    for (idx, candidate) in shortlist.iter_mut().enumerate() {
        candidate.rank = Some(idx + 1);
    }

    Ok(FunnelOutcome {
        shortlist,
        pool_size: run.sourced,
        filtered_out: run.filtered_out,
    })
}
