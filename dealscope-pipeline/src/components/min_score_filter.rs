use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{CompanyCandidate, MatchQuery};

/// Drops candidates below the funnel's inclusion threshold.
///
/// The threshold comes from the query's funnel config so callers can
/// tune recall per run; unscored candidates count as zero and fall out
/// unless the threshold itself is zero.
pub struct MinScoreFilter;

#[async_trait]
impl Filter<MatchQuery, CompanyCandidate> for MinScoreFilter {
    async fn filter(
        &self,
        query: &MatchQuery,
        candidates: Vec<CompanyCandidate>,
    ) -> Result<FilterResult<CompanyCandidate>, String> {
        let min = query.config.min_score;
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.score_or_zero() >= min);
        Ok(FilterResult { kept, removed })
    }
}
