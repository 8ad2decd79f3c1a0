//! The candidate pipeline orchestrator.
//!
//! A pipeline is a fixed sequence of stages over a query `Q` and a
//! candidate type `C`: sources produce, scorers annotate, filters
//! partition, the selector ranks and truncates, side effects observe.
//! Concrete pipelines only wire components; the `run` choreography is
//! provided here once.

use async_trait::async_trait;
use std::sync::Arc;

use crate::filter::Filter;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries must expose a request id for log correlation.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Outcome of a pipeline run, with the stage counts the caller's
/// summary needs.
#[derive(Clone, Debug)]
pub struct PipelineRun<C> {
    pub selected: Vec<C>,
    /// Candidates produced by the sources before any stage ran.
    pub sourced: usize,
    /// Candidates removed across all filter stages.
    pub filtered_out: usize,
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + HasRequestId + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;

    /// Run the full pipeline for one query.
    ///
    /// Stage order: sources -> scorers -> filters -> selector -> side
    /// effects. A failing side effect is logged and ignored; it never
    /// changes the result.
    async fn run(&self, query: Q) -> Result<PipelineRun<C>, String> {
        let mut candidates: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            let produced = source.get_candidates(&query).await?;
            candidates.extend(produced);
        }
        let sourced = candidates.len();

        for scorer in self.scorers() {
            if !scorer.enable(&query) {
                continue;
            }
            let scored = scorer.score(&query, &candidates).await?;
            if scored.len() != candidates.len() {
                return Err(format!(
                    "scorer {} returned {} results for {} candidates",
                    scorer.name(),
                    scored.len(),
                    candidates.len()
                ));
            }
            for (candidate, scored_value) in candidates.iter_mut().zip(scored) {
                scorer.update(candidate, scored_value);
            }
        }

        let mut filtered_out = 0;
        for filter in self.filters() {
            if !filter.enable(&query) {
                continue;
            }
            let result = filter.filter(&query, candidates).await?;
            filtered_out += result.removed.len();
            candidates = result.kept;
        }

        let selected = self.selector().select(&query, candidates);

        let input = Arc::new(SideEffectInput {
            query: Arc::new(query),
            selected_candidates: selected.clone(),
        });
        for side_effect in self.side_effects().iter() {
            if !side_effect.enable(Arc::clone(&input.query)) {
                continue;
            }
            if let Err(e) = side_effect.run(Arc::clone(&input)).await {
                log::warn!(
                    "request_id={} side effect {} failed: {}",
                    input.query.request_id(),
                    side_effect.name(),
                    e
                );
            }
        }

        Ok(PipelineRun {
            selected,
            sourced,
            filtered_out,
        })
    }
}
