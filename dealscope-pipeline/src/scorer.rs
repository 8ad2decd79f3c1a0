use async_trait::async_trait;

use crate::util;

/// Scorers attach score fields to candidates without consuming them.
///
/// `score` returns a parallel vector of partially-populated candidates
/// carrying only this scorer's output fields; `update` copies exactly
/// those fields back onto the original. This keeps every scorer
/// independent — no scorer can clobber another's fields.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Score all candidates, returning one scored value per input in
    /// the same order.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this scorer's fields from `scored` onto `candidate`.
    fn update(&self, candidate: &mut C, scored: C);

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
