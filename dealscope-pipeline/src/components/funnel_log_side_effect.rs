use async_trait::async_trait;
use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{CompanyCandidate, MatchQuery};

/// Logs shortlist stats after selection. Observability only — the
/// funnel result is unchanged whether this runs or fails.
pub struct FunnelLogSideEffect;

#[async_trait]
impl SideEffect<MatchQuery, CompanyCandidate> for FunnelLogSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<MatchQuery, CompanyCandidate>>,
    ) -> Result<(), String> {
        let top = input
            .selected_candidates
            .first()
            .map(|c| c.score_or_zero())
            .unwrap_or(0.0);
        log::info!(
            "request_id={} funnel produced {} candidates (top score {:.1})",
            input.query.request_id,
            input.selected_candidates.len(),
            top
        );
        Ok(())
    }
}
